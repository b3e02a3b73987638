//! Contact form messages sent to the platform

use serde::{Deserialize, Serialize};

use super::validation::require;
use super::{Entity, ValidationError};
use crate::kind::Kind;
use crate::seeds;

pub const STATUS_UNREAD: &str = "unread";
pub const STATUS_READ: &str = "read";

fn default_status() -> String {
    STATUS_UNREAD.to_string()
}

/// Contact message record body
///
/// `status` is a free string. `unread`/`read` are the values the admin
/// views know about, but updates accept anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default = "default_status")]
    pub status: String,
}

impl ContactMessage {
    pub fn is_unread(&self) -> bool {
        self.status == STATUS_UNREAD
    }
}

impl Entity for ContactMessage {
    const KIND: Kind = Kind::ContactMessage;

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("subject", &self.subject)?;
        require("message", &self.message)?;
        Ok(())
    }

    fn seed_set() -> Vec<Self> {
        seeds::contact_messages()
    }
}
