// roster-service/src/routes/mod.rs
pub mod auth_routes;
pub mod teammate_routes;
