//! Error types for variable reads
//!
//! Every failure the crate produces is an [`EnvVarError`]: a missing
//! required variable, a value that does not parse, a value that parses but
//! violates a constraint, or an extension accessor that failed. The cause is
//! carried by the message; the underlying parser or extension error, when
//! there is one, is kept as the error's `source()`.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! let env = env_var::from(HashMap::from([("LIMITS".to_string(), "{".to_string())]));
//! let err = env.get("LIMITS").as_json().unwrap_err();
//!
//! assert_eq!(err.name(), "LIMITS");
//! assert!(err.to_string().starts_with("env-var: \"LIMITS\""));
//! assert!(err.report().contains("caused by:"));
//! assert_ne!(err.root_cause().to_string(), err.to_string());
//! ```

mod chain;

use thiserror::Error;

/// Boxed error returned by accessor implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for variable reads.
pub type Result<T> = std::result::Result<T, EnvVarError>;

/// The single error kind raised while reading a variable.
#[derive(Debug, Error)]
#[error("env-var: \"{name}\" {message}")]
pub struct EnvVarError {
    name: String,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl EnvVarError {
    /// Create an error for `name` with a human-readable message.
    ///
    /// Also used by [`FromEnv::validate`](crate::FromEnv::validate)
    /// implementations to report cross-field failures.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Name of the variable that failed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Message without the `env-var: "NAME"` prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn missing(name: impl Into<String>) -> Self {
        Self::new(name, "is a required variable, but it was not set")
    }

    pub(crate) fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Wrap the error an accessor returned.
    ///
    /// A [`Rejected`] is unpacked so its message becomes the message and its
    /// own cause becomes the source. Any other error keeps its text as the
    /// message and is itself kept as the source.
    pub(crate) fn from_accessor(name: impl Into<String>, error: BoxError) -> Self {
        match error.downcast::<Rejected>() {
            Ok(rejected) => {
                let Rejected { message, source } = *rejected;
                Self {
                    name: name.into(),
                    message,
                    source,
                }
            }
            Err(other) => Self {
                name: name.into(),
                message: other.to_string(),
                source: Some(other),
            },
        }
    }

    pub(crate) fn with_example(mut self, example: Option<&str>) -> Self {
        if let Some(example) = example {
            self.message
                .push_str(&format!(". An example of a valid value would be: {}", example));
        }
        self
    }
}

/// Why an accessor refused a raw value.
///
/// Built-in accessors fail with this type, and extensions may use it too:
/// its message is reported verbatim after the variable name.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct Rejected {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl Rejected {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Rejection caused by a lower-level parser error.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_name() {
        let err = EnvVarError::new("PORT", "should be a valid integer");
        assert_eq!(err.to_string(), "env-var: \"PORT\" should be a valid integer");
        assert_eq!(err.name(), "PORT");
        assert_eq!(err.message(), "should be a valid integer");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_missing_message() {
        let err = EnvVarError::missing("API_KEY");
        assert_eq!(
            err.to_string(),
            "env-var: \"API_KEY\" is a required variable, but it was not set"
        );
    }

    #[test]
    fn test_from_accessor_unpacks_rejected() {
        let parse = "x".parse::<i64>().unwrap_err();
        let rejected: BoxError = Box::new(Rejected::with_source("should be a valid integer", parse));

        let err = EnvVarError::from_accessor("PORT", rejected);
        assert_eq!(err.message(), "should be a valid integer");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("invalid digit found in string".to_string())
        );
    }

    #[test]
    fn test_from_accessor_keeps_foreign_error() {
        let foreign: BoxError = "value must be even".into();

        let err = EnvVarError::from_accessor("COUNT", foreign);
        assert_eq!(err.message(), "value must be even");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("value must be even".to_string())
        );
    }

    #[test]
    fn test_with_example() {
        let err = EnvVarError::new("PORT", "should be a valid integer").with_example(Some("8080"));
        assert_eq!(
            err.message(),
            "should be a valid integer. An example of a valid value would be: 8080"
        );

        let err = EnvVarError::new("PORT", "should be a valid integer").with_example(None);
        assert_eq!(err.message(), "should be a valid integer");
    }
}
