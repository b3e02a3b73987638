//! Domain models with validation at construction
//!
//! Each kind has a typed schema. Input is decoded into that schema and
//! checked for empty required fields; invalid input returns
//! ValidationError, not panic.

pub mod contact_message;
pub mod entity;
pub mod pagination;
pub mod salon_owner;
pub mod salon_profile;
pub mod user;
pub mod validation;

pub use contact_message::ContactMessage;
pub use entity::Entity;
pub use pagination::{Paginated, Pagination};
pub use salon_owner::SalonOwner;
pub use salon_profile::{DayHours, SalonProfile, Service, WorkingHours};
pub use user::{Role, User};
pub use validation::ValidationError;
