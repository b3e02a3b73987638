//! Platform user accounts

use serde::{Deserialize, Serialize};

use super::validation::require;
use super::{Entity, ValidationError};
use crate::kind::Kind;
use crate::seeds;

/// Known user roles.
///
/// The stored `role` stays a free string; this enum only classifies it
/// for summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Customer,
    SalonOwner,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::SalonOwner => "salon_owner",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Self::Customer),
            "salon_owner" => Some(Self::SalonOwner),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// User record body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salon_name: Option<String>,
}

impl Entity for User {
    const KIND: Kind = Kind::User;
    const SENSITIVE_FIELDS: &'static [&'static str] = &["password"];
    const UNIQUE_FIELDS: &'static [&'static str] = &["email"];

    fn validate(&self) -> Result<(), ValidationError> {
        require("username", &self.username)?;
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("role", &self.role)?;
        Ok(())
    }

    fn seed_set() -> Vec<Self> {
        seeds::users()
    }
}
