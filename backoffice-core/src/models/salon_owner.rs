//! Salon owner accounts

use serde::{Deserialize, Serialize};

use super::validation::require;
use super::{Entity, ValidationError};
use crate::kind::Kind;
use crate::seeds;

/// Salon owner record body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalonOwner {
    pub username: String,
    pub email: String,
    pub password: String,
    pub salon_name: String,
}

impl Entity for SalonOwner {
    const KIND: Kind = Kind::SalonOwner;
    const SENSITIVE_FIELDS: &'static [&'static str] = &["password"];

    fn validate(&self) -> Result<(), ValidationError> {
        require("username", &self.username)?;
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("salonName", &self.salon_name)?;
        Ok(())
    }

    fn seed_set() -> Vec<Self> {
        seeds::salon_owners()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn salon_name_is_required() {
        let fields = json!({"username": "o", "email": "o@x", "password": "p"});
        let err = SalonOwner::from_fields(fields.as_object().cloned().unwrap()).unwrap_err();
        assert_eq!(err, ValidationError::missing("salonName"));
    }
}
