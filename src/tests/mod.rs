// roster-service/src/tests/mod.rs
pub mod support;

mod engine_tests;
