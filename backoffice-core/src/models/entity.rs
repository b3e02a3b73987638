//! The `Entity` trait ties a typed schema to its kind

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::ValidationError;
use crate::kind::Kind;
use crate::record::Fields;

/// A record kind with a typed field schema and a seed set.
///
/// Repositories are generic over this trait, so every kind gets the
/// same read-or-seed, create and delete-all behaviour.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: Kind;

    /// Fields never returned to callers (e.g. password).
    const SENSITIVE_FIELDS: &'static [&'static str] = &[];

    /// Fields checked for an existing match before insert.
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    /// Reject empty required fields.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Literal records used to backfill an empty collection, in insert order.
    fn seed_set() -> Vec<Self>;

    /// Decode and validate a raw field map.
    fn from_fields(fields: Fields) -> Result<Self, ValidationError> {
        let entity: Self = serde_json::from_value(Value::Object(fields))
            .map_err(|e| ValidationError::from_decode(Self::KIND.label(), &e))?;
        entity.validate()?;
        Ok(entity)
    }

    /// Encode into the field map stored for the record body.
    fn to_fields(&self) -> Result<Fields, ValidationError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ValidationError::invalid_format(
                Self::KIND.label(),
                format!("expected an object, got {}", other),
            )),
            Err(e) => Err(ValidationError::invalid_format(
                Self::KIND.label(),
                e.to_string(),
            )),
        }
    }
}
