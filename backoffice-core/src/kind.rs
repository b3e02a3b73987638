//! Record kinds and their per-kind metadata

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::ValidationError;

/// The four record kinds managed by the back office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    User,
    SalonOwner,
    SalonProfile,
    ContactMessage,
}

impl Kind {
    pub const ALL: [Kind; 4] = [
        Kind::User,
        Kind::SalonOwner,
        Kind::SalonProfile,
        Kind::ContactMessage,
    ];

    /// Collection the kind's records live in.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::User => "users",
            Self::SalonOwner => "salonowners",
            Self::SalonProfile => "salonprofiles",
            Self::ContactMessage => "contacts",
        }
    }

    /// Human label used in log lines and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::SalonOwner => "salon owner",
            Self::SalonProfile => "salon",
            Self::ContactMessage => "message",
        }
    }

    /// Path segment of the kind's REST resource (under `/api`).
    pub fn route(&self) -> &'static str {
        match self {
            Self::User => "users",
            Self::SalonOwner => "salon-owners",
            Self::SalonProfile => "salons",
            Self::ContactMessage => "messages",
        }
    }

    /// Fields the admin list views search in (case-insensitive substring).
    pub fn search_fields(&self) -> &'static [&'static str] {
        match self {
            Self::User => &["username"],
            Self::SalonOwner => &["username", "salonName"],
            Self::SalonProfile => &["salonName", "ownerName"],
            Self::ContactMessage => &["name"],
        }
    }

    /// Whether lists of this kind come back newest first.
    pub fn newest_first(&self) -> bool {
        matches!(self, Self::ContactMessage)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

impl FromStr for Kind {
    type Err = ValidationError;

    /// Accepts the route name plus a few singular/alias spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "users" | "user" => Ok(Self::User),
            "salon-owners" | "salon-owner" | "owners" | "salonowners" => Ok(Self::SalonOwner),
            "salons" | "salon" | "salon-profiles" | "salonprofiles" => Ok(Self::SalonProfile),
            "messages" | "message" | "contacts" => Ok(Self::ContactMessage),
            other => Err(ValidationError::InvalidVariant {
                field: "kind",
                value: other.to_string(),
            }),
        }
    }
}
