//! Typed, fail-fast access to environment variables
//!
//! This crate reads values from a string-keyed source (normally the process
//! environment), checks that required ones are set, and coerces them into
//! typed values. Every failure is an [`EnvVarError`] naming the variable.
//!
//! # Modules
//!
//! - `accessors` - Built-in conversion functions and the `BuiltinAccessor` catalog
//! - `error` - The error type and error-chain formatting helpers
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! let env = env_var::from(HashMap::from([
//!     ("DATABASE_URL".to_string(), "postgres://db:5432/app".to_string()),
//!     ("LOG_LEVEL".to_string(), "debug".to_string()),
//!     ("FEATURES".to_string(), "search,export".to_string()),
//! ]));
//!
//! let database = env.get("DATABASE_URL").required()?.as_url_object()?;
//! let level = env.get("LOG_LEVEL").as_enum(&["error", "warn", "info", "debug"])?;
//! let features = env.get("FEATURES").as_array()?.unwrap_or_default();
//! let verbose = env.get_or("VERBOSE", false).as_bool()?;
//!
//! assert_eq!(database.port(), Some(5432));
//! assert_eq!(level.as_deref(), Some("debug"));
//! assert_eq!(features, vec!["search", "export"]);
//! assert_eq!(verbose, Some(false));
//! # Ok::<(), env_var::EnvVarError>(())
//! ```
//!
//! The process environment is available through [`get`] and [`get_or`]:
//!
//! ```rust,ignore
//! let port = env_var::get("PORT").required()?.as_port_number()?;
//! ```

pub mod accessors;
mod config;
mod default_value;
mod env;
pub mod error;
mod registry;
mod source;
mod value;
mod variable;

pub use accessors::BuiltinAccessor;
pub use config::FromEnv;
pub use default_value::DefaultValue;
pub use env::{env, from, from_with, get, get_or, Env};
pub use error::{BoxError, EnvVarError, Rejected, Result};
pub use registry::{Accessor, AccessorRegistry, Extensions, FnAccessor};
pub use source::{ProcessEnv, Source};
pub use value::EnvValue;
pub use variable::{Optional, Presence, Required, Variable};

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
