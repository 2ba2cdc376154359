// roster-service/src/services/mod.rs
pub mod tracker_service;
