//! The chainable per-read variable
//!
//! A [`Variable`] is created by every `get()` and consumed by exactly one
//! terminal accessor. Between the two, the caller may require the value,
//! attach an example for error messages, or transform the raw string:
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! let env = env_var::from(HashMap::from([
//!     ("PORT".to_string(), "8080".to_string()),
//!     ("SECRET".to_string(), "aHVudGVyMg==".to_string()),
//! ]));
//!
//! let port: u16 = env.get("PORT").required()?.as_port_number()?;
//! let secret = env.get("SECRET").convert_from_base64()?.as_string()?;
//! let workers = env.get("WORKERS").as_int_positive()?;
//!
//! assert_eq!(port, 8080);
//! assert_eq!(secret.as_deref(), Some("hunter2"));
//! assert_eq!(workers, None);
//! # Ok::<(), env_var::EnvVarError>(())
//! ```
//!
//! Terminal accessors take the variable by value, so a second terminal call
//! on the same variable does not compile:
//!
//! ```compile_fail
//! use std::collections::HashMap;
//!
//! let env = env_var::from(HashMap::from([("PORT".to_string(), "8080".to_string())]));
//! let port = env.get("PORT");
//! let first = port.as_int();
//! let second = port.as_string();
//! ```

use crate::error::{BoxError, EnvVarError, Result};
use crate::registry::AccessorRegistry;
use crate::value::{EnvValue, FromEnvValue};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::marker::PhantomData;
use tracing::trace;
use url::Url;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Optional {}
    impl Sealed for super::Required {}
}

/// Whether a variable has passed the `required()` check.
///
/// Decides the output shape of terminal accessors: `Option<T>` for an
/// optional variable, plain `T` once the value is known to be set.
pub trait Presence: sealed::Sealed {
    type Output<T>;

    #[doc(hidden)]
    fn settle<T>(value: Option<T>) -> Option<Self::Output<T>>;
}

/// Marker for a variable that may be unset.
#[derive(Debug, Clone, Copy)]
pub enum Optional {}

/// Marker for a variable that passed `required()`.
#[derive(Debug, Clone, Copy)]
pub enum Required {}

impl Presence for Optional {
    type Output<T> = Option<T>;

    fn settle<T>(value: Option<T>) -> Option<Option<T>> {
        Some(value)
    }
}

impl Presence for Required {
    type Output<T> = T;

    fn settle<T>(value: Option<T>) -> Option<T> {
        value
    }
}

/// One in-flight read of a named variable.
#[derive(Debug)]
pub struct Variable<'env, P: Presence = Optional> {
    name: String,
    value: Option<String>,
    default_used: bool,
    required: bool,
    example: Option<String>,
    registry: &'env AccessorRegistry,
    presence: PhantomData<P>,
}

impl<'env> Variable<'env, Optional> {
    pub(crate) fn new(
        name: impl Into<String>,
        value: Option<String>,
        default_used: bool,
        registry: &'env AccessorRegistry,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            default_used,
            required: false,
            example: None,
            registry,
            presence: PhantomData,
        }
    }
}

impl<'env, P: Presence> Variable<'env, P> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw value after any transforms; `None` when unset with no default.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// True when the value came from the caller's default.
    pub fn is_default_used(&self) -> bool {
        self.default_used
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Fail unless the variable is set to a non-empty value.
    pub fn required(self) -> Result<Variable<'env, Required>> {
        if !self.is_set() {
            return Err(self.missing());
        }

        Ok(Variable {
            name: self.name,
            value: self.value,
            default_used: self.default_used,
            required: true,
            example: self.example,
            registry: self.registry,
            presence: PhantomData,
        })
    }

    /// `required()` decided at runtime; `false` is a no-op.
    ///
    /// The output shape stays optional because the decision is not known
    /// statically.
    pub fn required_if(mut self, is_required: bool) -> Result<Self> {
        if is_required {
            if !self.is_set() {
                return Err(self.missing());
            }
            self.required = true;
        }
        Ok(self)
    }

    /// Example value appended to every error raised for this variable.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Replace the value with its base64-decoded text.
    ///
    /// An unset value stays unset. Decoding twice is not detected. A
    /// required variable must not decode to empty text.
    pub fn convert_from_base64(mut self) -> Result<Self> {
        if let Some(encoded) = self.value.take() {
            let bytes = STANDARD
                .decode(encoded.trim())
                .map_err(|e| self.fail_with("should be a valid base64 string", e))?;
            let decoded = String::from_utf8(bytes)
                .map_err(|e| self.fail_with("should decode from base64 to valid UTF-8 text", e))?;
            if self.required && decoded.is_empty() {
                return Err(self.fail("should decode from base64 to a non-empty value"));
            }
            self.value = Some(decoded);
        }
        Ok(self)
    }

    /// Invoke any registered accessor by name.
    pub fn call(self, accessor: &str, args: &[&str]) -> Result<P::Output<EnvValue>> {
        self.extract(accessor, args)
    }

    pub fn as_string(self) -> Result<P::Output<String>> {
        self.extract("asString", &[])
    }

    pub fn as_int(self) -> Result<P::Output<i64>> {
        self.extract("asInt", &[])
    }

    pub fn as_int_positive(self) -> Result<P::Output<i64>> {
        self.extract("asIntPositive", &[])
    }

    pub fn as_int_negative(self) -> Result<P::Output<i64>> {
        self.extract("asIntNegative", &[])
    }

    pub fn as_float(self) -> Result<P::Output<f64>> {
        self.extract("asFloat", &[])
    }

    pub fn as_float_positive(self) -> Result<P::Output<f64>> {
        self.extract("asFloatPositive", &[])
    }

    pub fn as_float_negative(self) -> Result<P::Output<f64>> {
        self.extract("asFloatNegative", &[])
    }

    pub fn as_port_number(self) -> Result<P::Output<u16>> {
        self.extract("asPortNumber", &[])
    }

    pub fn as_bool(self) -> Result<P::Output<bool>> {
        self.extract("asBool", &[])
    }

    pub fn as_bool_strict(self) -> Result<P::Output<bool>> {
        self.extract("asBoolStrict", &[])
    }

    pub fn as_enum(self, valid_values: &[&str]) -> Result<P::Output<String>> {
        self.extract("asEnum", valid_values)
    }

    pub fn as_json(self) -> Result<P::Output<Value>> {
        self.extract("asJson", &[])
    }

    pub fn as_json_array(self) -> Result<P::Output<Vec<Value>>> {
        self.extract("asJsonArray", &[])
    }

    pub fn as_json_object(self) -> Result<P::Output<Map<String, Value>>> {
        self.extract("asJsonObject", &[])
    }

    /// Comma-separated list.
    pub fn as_array(self) -> Result<P::Output<Vec<String>>> {
        self.extract("asArray", &[])
    }

    pub fn as_array_with(self, delimiter: &str) -> Result<P::Output<Vec<String>>> {
        self.extract("asArray", &[delimiter])
    }

    /// Comma-separated set.
    pub fn as_set(self) -> Result<P::Output<BTreeSet<String>>> {
        self.extract("asSet", &[])
    }

    pub fn as_set_with(self, delimiter: &str) -> Result<P::Output<BTreeSet<String>>> {
        self.extract("asSet", &[delimiter])
    }

    pub fn as_url_string(self) -> Result<P::Output<String>> {
        self.extract("asUrlString", &[])
    }

    pub fn as_url_object(self) -> Result<P::Output<Url>> {
        self.extract("asUrlObject", &[])
    }

    pub fn as_email_string(self) -> Result<P::Output<String>> {
        self.extract("asEmailString", &[])
    }

    pub fn as_regex(self) -> Result<P::Output<Regex>> {
        self.extract("asRegExp", &[])
    }

    pub fn as_regex_with(self, flags: &str) -> Result<P::Output<Regex>> {
        self.extract("asRegExp", &[flags])
    }

    fn is_set(&self) -> bool {
        self.value.as_deref().is_some_and(|value| !value.is_empty())
    }

    fn missing(&self) -> EnvVarError {
        EnvVarError::missing(&self.name).with_example(self.example.as_deref())
    }

    fn fail(&self, message: impl Into<String>) -> EnvVarError {
        EnvVarError::new(&self.name, message).with_example(self.example.as_deref())
    }

    fn fail_with(&self, message: &str, source: impl Into<BoxError>) -> EnvVarError {
        self.fail(message).with_source(source)
    }

    /// Run `accessor` on the value and narrow the result to `T`.
    ///
    /// An absent value short-circuits without running the accessor. An empty
    /// value is present and is handed to the accessor like any other.
    fn extract<T: FromEnvValue>(self, accessor: &str, args: &[&str]) -> Result<P::Output<T>> {
        let Some(raw) = self.value.as_deref() else {
            return P::settle::<T>(None).ok_or_else(|| self.missing());
        };

        trace!(
            variable = %self.name,
            accessor,
            default_used = self.default_used,
            "Reading variable"
        );

        let handler = self.registry.get(accessor).ok_or_else(|| {
            self.fail(format!("cannot be read, no accessor named \"{}\" is registered", accessor))
        })?;

        let produced = handler.access(raw, args).map_err(|e| {
            EnvVarError::from_accessor(&self.name, e).with_example(self.example.as_deref())
        })?;

        let typed = T::from_env_value(produced).map_err(|other| {
            self.fail(format!(
                "accessor \"{}\" produced {}, expected {}",
                accessor,
                other.kind(),
                T::EXPECTED
            ))
        })?;

        P::settle(Some(typed)).ok_or_else(|| self.missing())
    }
}
