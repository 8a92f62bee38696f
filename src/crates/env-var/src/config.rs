//! Typed configuration structs
//!
//! [`FromEnv`] gives startup code one place to read every variable it needs
//! and check the constraints that span several of them.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use env_var::{Env, EnvVarError, FromEnv, Result, Source};
//!
//! struct ServerConfig {
//!     host: String,
//!     port: u16,
//!     min_workers: i64,
//!     max_workers: i64,
//! }
//!
//! impl FromEnv for ServerConfig {
//!     fn from_env<S: Source>(env: &Env<S>) -> Result<Self> {
//!         Ok(Self {
//!             host: env.get_or("HOST", "127.0.0.1").as_string()?.unwrap_or_default(),
//!             port: env.get("PORT").required()?.as_port_number()?,
//!             min_workers: env.get_or("MIN_WORKERS", 1).as_int_positive()?.unwrap_or(1),
//!             max_workers: env.get_or("MAX_WORKERS", 8).as_int_positive()?.unwrap_or(8),
//!         })
//!     }
//!
//!     fn validate(&self) -> Result<()> {
//!         if self.min_workers > self.max_workers {
//!             return Err(EnvVarError::new("MIN_WORKERS", "must not exceed MAX_WORKERS"));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let env = env_var::from(HashMap::from([("PORT".to_string(), "8080".to_string())]));
//! let config = ServerConfig::load(&env)?;
//! assert_eq!(config.host, "127.0.0.1");
//! assert_eq!(config.port, 8080);
//! # Ok::<(), EnvVarError>(())
//! ```

use crate::env::Env;
use crate::error::Result;
use crate::source::Source;
use tracing::error;

/// A configuration struct read from a binding.
pub trait FromEnv: Sized {
    /// Read every field; fail on the first invalid variable.
    fn from_env<S: Source>(env: &Env<S>) -> Result<Self>;

    /// Check constraints between fields.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Read and validate.
    fn load<S: Source>(env: &Env<S>) -> Result<Self> {
        let config = Self::from_env(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate from the process environment.
    ///
    /// A failure is logged with its full cause list before it is returned.
    fn load_from_process() -> Result<Self> {
        Self::load(crate::env::env()).inspect_err(|e| {
            error!(variable = e.name(), "Configuration failed to load:\n{}", e.report());
        })
    }
}
