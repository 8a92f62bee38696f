//! Named accessors and the per-binding accessor table
//!
//! Built-ins and caller extensions share one namespace. The table is merged
//! once, when a binding is created, and never changes afterwards; every
//! [`Variable`](crate::Variable) produced by that binding borrows it.

use crate::accessors::BuiltinAccessor;
use crate::error::BoxError;
use crate::value::EnvValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A conversion from a raw value to an [`EnvValue`].
///
/// Only called for variables that are present; the value may be empty.
///
/// Extra positional arguments come from the caller of
/// [`Variable::call`](crate::Variable::call) or of a typed accessor that
/// takes parameters (`as_enum`, `as_array_with`, ...).
pub trait Accessor: Send + Sync {
    fn access(&self, value: &str, args: &[&str]) -> Result<EnvValue, BoxError>;
}

/// Adapter turning a closure into an [`Accessor`].
pub struct FnAccessor<F>(F);

impl<F> FnAccessor<F>
where
    F: Fn(&str, &[&str]) -> Result<EnvValue, BoxError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Accessor for FnAccessor<F>
where
    F: Fn(&str, &[&str]) -> Result<EnvValue, BoxError> + Send + Sync,
{
    fn access(&self, value: &str, args: &[&str]) -> Result<EnvValue, BoxError> {
        (self.0)(value, args)
    }
}

/// Caller-supplied accessors, registered before a binding is created.
///
/// Registering the same name twice keeps the later accessor.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use env_var::{EnvValue, Extensions};
///
/// let extensions = Extensions::new().with("asUpper", |value, _args| {
///     Ok(EnvValue::String(value.to_uppercase()))
/// });
///
/// let env = env_var::from_with(
///     HashMap::from([("REGION".to_string(), "eu-west-1".to_string())]),
///     extensions,
/// );
///
/// let region = env.get("REGION").call("asUpper", &[]).unwrap();
/// assert_eq!(region, Some(EnvValue::String("EU-WEST-1".to_string())));
/// ```
#[derive(Clone, Default)]
pub struct Extensions {
    accessors: Vec<(String, Arc<dyn Accessor>)>,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure under `name`
    ///
    /// # Arguments
    ///
    /// * `name` - Registry name; reusing a built-in name overrides it
    /// * `f` - Called with the raw value and the caller's extra arguments
    ///
    /// # Returns
    ///
    /// The builder, for chaining further registrations.
    pub fn with<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &[&str]) -> Result<EnvValue, BoxError> + Send + Sync + 'static,
    {
        self.with_accessor(name, FnAccessor::new(f))
    }

    /// Register any [`Accessor`] implementation under `name`.
    pub fn with_accessor(mut self, name: impl Into<String>, accessor: impl Accessor + 'static) -> Self {
        self.accessors.push((name.into(), Arc::new(accessor)));
        self
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.accessors.iter().map(|(name, _)| name))
            .finish()
    }
}

/// Merged, immutable name → accessor table.
pub struct AccessorRegistry {
    accessors: HashMap<String, Arc<dyn Accessor>>,
}

impl AccessorRegistry {
    /// Built-ins only.
    pub fn builtin() -> Self {
        let accessors = BuiltinAccessor::ALL
            .into_iter()
            .map(|accessor| {
                (
                    accessor.name().to_string(),
                    Arc::new(accessor) as Arc<dyn Accessor>,
                )
            })
            .collect();

        Self { accessors }
    }

    /// Built-ins merged with `extensions`; extensions win on name clashes.
    pub fn new(extensions: Extensions) -> Self {
        let mut registry = Self::builtin();

        for (name, accessor) in extensions.accessors {
            if BuiltinAccessor::from_name(&name).is_some() {
                debug!(accessor = %name, "Extension overrides built-in accessor");
            }
            registry.accessors.insert(name, accessor);
        }

        registry
    }

    /// Look up an accessor by name
    ///
    /// # Arguments
    ///
    /// * `name` - Registry name, e.g. `asInt` or an extension name
    ///
    /// # Returns
    ///
    /// * `Some(accessor)` if a built-in or extension is registered under `name`
    /// * `None` otherwise
    pub fn get(&self, name: &str) -> Option<&dyn Accessor> {
        self.accessors.get(name).map(|accessor| accessor.as_ref())
    }

    /// Whether `name` resolves to an accessor.
    pub fn contains(&self, name: &str) -> bool {
        self.accessors.contains_key(name)
    }

    /// Registered names
    ///
    /// # Returns
    ///
    /// Every built-in and extension name, sorted, each listed once even when
    /// an extension overrides a built-in.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.accessors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of distinct accessor names.
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

impl Default for AccessorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for AccessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorRegistry")
            .field("accessors", &self.names())
            .finish()
    }
}
