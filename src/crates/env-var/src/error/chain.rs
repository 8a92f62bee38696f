//! Rendering a failed read with its causes
//!
//! Startup code usually aborts on the first configuration failure, and the
//! one-line `Display` form hides the parser or extension error behind it.

use super::EnvVarError;
use std::error::Error as StdError;
use std::iter;

impl EnvVarError {
    /// Every error behind this one, nearest first.
    pub fn causes(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> + '_ {
        iter::successors(self.source(), |&cause: &&(dyn StdError + 'static)| cause.source())
    }

    /// The innermost cause, or the error itself when nothing caused it.
    ///
    /// For a coercion failure this is the parser error; for an extension
    /// failure it is whatever the extension returned.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        self.causes()
            .last()
            .unwrap_or(self as &(dyn StdError + 'static))
    }

    /// Multi-line description for operators
    ///
    /// # Returns
    ///
    /// The `Display` line of the error, followed by one `caused by:` line
    /// per cause.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// if let Err(e) = env_var::get("DATABASE_URL").required().and_then(|v| v.as_url_object()) {
    ///     eprintln!("{}", e.report());
    ///     std::process::exit(1);
    /// }
    /// ```
    pub fn report(&self) -> String {
        self.causes().fold(self.to_string(), |mut report, cause| {
            report.push_str("\n  caused by: ");
            report.push_str(&cause.to_string());
            report
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{BoxError, EnvVarError, Rejected};

    fn url_failure() -> EnvVarError {
        let parse = url::Url::parse("not a url").unwrap_err();
        EnvVarError::from_accessor(
            "DATABASE_URL",
            Box::new(Rejected::with_source("should be a valid URL", parse)),
        )
    }

    #[derive(Debug, thiserror::Error)]
    #[error("vault unreachable")]
    struct VaultDown(#[source] std::io::Error);

    #[test]
    fn test_report_lists_causes() {
        assert_eq!(
            url_failure().report(),
            "env-var: \"DATABASE_URL\" should be a valid URL\n  caused by: relative URL without a base"
        );
    }

    #[test]
    fn test_nested_extension_causes() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out");
        let boxed: BoxError = Box::new(VaultDown(io));
        let err = EnvVarError::from_accessor("API_TOKEN", boxed);

        assert_eq!(err.causes().count(), 2);
        assert_eq!(err.root_cause().to_string(), "connect timed out");
        assert!(err.report().ends_with("caused by: vault unreachable\n  caused by: connect timed out"));
    }

    #[test]
    fn test_root_cause() {
        let err = url_failure();
        assert_eq!(err.root_cause().to_string(), "relative URL without a base");
    }

    #[test]
    fn test_error_without_cause() {
        let error = EnvVarError::missing("TOKEN").with_example(Some("abc123"));

        assert_eq!(error.causes().count(), 0);
        assert_eq!(error.report(), error.to_string());
        assert_eq!(error.root_cause().to_string(), error.to_string());
        assert!(error.report().contains("An example of a valid value would be: abc123"));
    }
}
