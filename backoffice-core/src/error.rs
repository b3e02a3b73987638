/// Structured error types for backoffice-core.
///
/// Library consumers get `thiserror` enums; the CLI wraps them in
/// `anyhow` with context.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// Config file is not valid TOML for the expected shape
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Environment variable holds a value of the wrong type
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Result type alias for backoffice-core configuration
pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    pub fn invalid_env(var: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEnv {
            var,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::invalid_env("PORT", "abc", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "invalid value 'abc' for PORT: invalid digit found in string"
        );
    }
}
