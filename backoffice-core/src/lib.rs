//! backoffice-core: domain model for the salon back office
//!
//! Holds everything that does not touch the network or the database:
//! - record kinds and their field schemas
//! - the literal seed sets used to backfill empty collections
//! - configuration loading (defaults, TOML file, environment)
//! - client-side list filtering and in-memory pagination

pub mod config;
pub mod error;
pub mod filters;
pub mod kind;
pub mod models;
pub mod record;
pub mod seeds;

pub use config::{BackofficeConfig, Environment};
pub use error::{ConfigError, Result};
pub use kind::Kind;
pub use models::{
    ContactMessage, DayHours, Entity, Role, SalonOwner, SalonProfile, Service, User,
    ValidationError, WorkingHours,
};
pub use record::{Fields, Record};
