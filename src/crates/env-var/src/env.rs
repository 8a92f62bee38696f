//! Source bindings
//!
//! An [`Env`] pairs a [`Source`] with the accessor table merged from the
//! built-ins and any [`Extensions`]. It hands out a fresh
//! [`Variable`] for every read.

use crate::default_value::DefaultValue;
use crate::registry::{AccessorRegistry, Extensions};
use crate::source::{ProcessEnv, Source};
use crate::variable::Variable;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// A source bound to an accessor table.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
///
/// let env = env_var::from(HashMap::from([("WORKERS".to_string(), "4".to_string())]));
///
/// assert_eq!(env.get("WORKERS").as_int_positive().unwrap(), Some(4));
/// assert_eq!(env.get_or("TIMEOUT_SECS", 30).as_int_positive().unwrap(), Some(30));
/// assert_eq!(env.all().len(), 1);
/// ```
#[derive(Debug)]
pub struct Env<S> {
    source: S,
    registry: AccessorRegistry,
}

impl<S: Source> Env<S> {
    /// Bind `source` with the built-in accessors only.
    pub fn new(source: S) -> Self {
        Self::with_extensions(source, Extensions::new())
    }

    /// Bind `source` with built-ins plus `extensions`.
    ///
    /// Extensions override built-ins of the same name; among extensions the
    /// last registration wins. The table is fixed from here on.
    pub fn with_extensions(source: S, extensions: Extensions) -> Self {
        let extension_count = extensions.len();
        let registry = AccessorRegistry::new(extensions);

        debug!(
            accessors = registry.len(),
            extensions = extension_count,
            "Bound environment source"
        );

        Self { source, registry }
    }

    /// Read `name` from the source.
    pub fn get(&self, name: &str) -> Variable<'_> {
        let value = self.source.lookup(name);
        trace!(variable = name, found = value.is_some(), "Looked up variable");
        Variable::new(name, value, false, &self.registry)
    }

    /// Read `name`, falling back to `default` when the source has no entry.
    ///
    /// A value present in the source always wins, even when it is empty.
    pub fn get_or(&self, name: &str, default: impl DefaultValue) -> Variable<'_> {
        match self.source.lookup(name) {
            Some(value) => {
                trace!(variable = name, "Looked up variable");
                Variable::new(name, Some(value), false, &self.registry)
            }
            None => {
                let value = default.into_raw();
                debug!(variable = name, default = %value, "Variable not set, using default");
                Variable::new(name, Some(value), true, &self.registry)
            }
        }
    }

    /// The whole source mapping, unvalidated.
    pub fn all(&self) -> HashMap<String, String> {
        self.source.entries()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn registry(&self) -> &AccessorRegistry {
        &self.registry
    }

    /// Names of every accessor this binding can dispatch to, sorted.
    pub fn accessor_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn has_accessor(&self, name: &str) -> bool {
        self.registry.contains(name)
    }
}

/// Bind `source` with the built-in accessors.
pub fn from<S: Source>(source: S) -> Env<S> {
    Env::new(source)
}

/// Bind `source` with built-ins plus `extensions`.
pub fn from_with<S: Source>(source: S, extensions: Extensions) -> Env<S> {
    Env::with_extensions(source, extensions)
}

static PROCESS_ENV: LazyLock<Env<ProcessEnv>> = LazyLock::new(|| Env::new(ProcessEnv));

/// Process-wide binding over the real environment, built on first use.
///
/// Values are still looked up on every read, so variables set after the
/// binding was created are visible.
pub fn env() -> &'static Env<ProcessEnv> {
    &PROCESS_ENV
}

/// Read `name` from the process environment.
pub fn get(name: &str) -> Variable<'static> {
    env().get(name)
}

/// Read `name` from the process environment with a default.
pub fn get_or(name: &str, default: impl DefaultValue) -> Variable<'static> {
    env().get_or(name, default)
}
