//! Command implementations for the backoffice CLI

pub mod admin;
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use admin::{run_create_user, run_list, run_purge, run_set_status};
pub use serve::run_serve;
