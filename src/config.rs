// roster-service/src/config.rs
use std::env;
use std::path::PathBuf;

use crate::services::tracker_service::RollbackPolicy;

// Process-wide configuration, read from the environment exactly once during
// bootstrap and injected from there
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub storage_root: PathBuf,
    pub rollback_policy: RollbackPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:9090".to_string());

        let storage_root: PathBuf = env::var("STORAGE_ROOT")
            .unwrap_or_else(|_| "./storage".to_string())
            .into();

        // Opt into reverting the optimistic local copy when a toggle write
        // fails; the default keeps it, matching the tracker's original
        // behavior
        let rollback_policy = match env::var("TOGGLE_ROLLBACK").as_deref() {
            Ok("rollback") | Ok("true") | Ok("1") => RollbackPolicy::Rollback,
            _ => RollbackPolicy::KeepLocal,
        };

        Config {
            bind_address,
            storage_root,
            rollback_policy,
        }
    }
}
