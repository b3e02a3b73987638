//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is absent from the input
    Missing { field: String },

    /// Required field is present but empty
    Empty { field: String },

    /// Input could not be decoded into the kind's schema
    InvalidFormat { field: String, reason: String },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn empty(field: impl Into<String>) -> Self {
        Self::Empty {
            field: field.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Map a serde decode failure onto the closest validation error.
    ///
    /// serde_json reports missing fields as "missing field `name`".
    pub fn from_decode(kind: &str, err: &serde_json::Error) -> Self {
        let text = err.to_string();
        if let Some(rest) = text.strip_prefix("missing field `") {
            if let Some(end) = rest.find('`') {
                return Self::missing(&rest[..end]);
            }
        }
        Self::invalid_format(kind, text)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject an empty (or whitespace-only) required string.
pub(crate) fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            ValidationError::missing("email").to_string(),
            "email is required"
        );
        assert_eq!(
            ValidationError::empty("username").to_string(),
            "username cannot be empty"
        );
    }

    #[test]
    fn decode_missing_field_is_recognised() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Probe {
            subject: String,
        }

        let err = serde_json::from_str::<Probe>("{}").unwrap_err();
        assert_eq!(
            ValidationError::from_decode("message", &err),
            ValidationError::missing("subject")
        );
    }

    #[test]
    fn decode_type_mismatch_is_invalid_format() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Probe {
            price: f64,
        }

        let err = serde_json::from_str::<Probe>(r#"{"price": "cheap"}"#).unwrap_err();
        assert!(matches!(
            ValidationError::from_decode("salon", &err),
            ValidationError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn require_rejects_blank() {
        assert!(require("name", "Ann").is_ok());
        assert_eq!(require("name", "   "), Err(ValidationError::empty("name")));
    }
}
