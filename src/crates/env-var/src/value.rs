//! Typed accessor output
//!
//! Accessors registered by name all produce an [`EnvValue`]. The typed
//! methods on [`Variable`](crate::Variable) then narrow it to the Rust type
//! they promise, so an extension that overrides a built-in name must produce
//! the same variant as the built-in it replaces.

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use url::Url;

/// Value produced by an accessor.
#[derive(Debug, Clone)]
pub enum EnvValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Json(Value),
    List(Vec<String>),
    Set(BTreeSet<String>),
    Url(Url),
    Regex(Regex),
}

impl EnvValue {
    /// Short description of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            EnvValue::String(_) => "a string",
            EnvValue::Int(_) => "an integer",
            EnvValue::Float(_) => "a float",
            EnvValue::Bool(_) => "a boolean",
            EnvValue::Json(Value::Array(_)) => "a JSON array",
            EnvValue::Json(Value::Object(_)) => "a JSON object",
            EnvValue::Json(_) => "a JSON value",
            EnvValue::List(_) => "a list",
            EnvValue::Set(_) => "a set",
            EnvValue::Url(_) => "a URL",
            EnvValue::Regex(_) => "a regular expression",
        }
    }
}

impl PartialEq for EnvValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EnvValue::String(a), EnvValue::String(b)) => a == b,
            (EnvValue::Int(a), EnvValue::Int(b)) => a == b,
            (EnvValue::Float(a), EnvValue::Float(b)) => a == b,
            (EnvValue::Bool(a), EnvValue::Bool(b)) => a == b,
            (EnvValue::Json(a), EnvValue::Json(b)) => a == b,
            (EnvValue::List(a), EnvValue::List(b)) => a == b,
            (EnvValue::Set(a), EnvValue::Set(b)) => a == b,
            (EnvValue::Url(a), EnvValue::Url(b)) => a == b,
            (EnvValue::Regex(a), EnvValue::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for EnvValue {
                fn from(value: $ty) -> Self {
                    EnvValue::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    String => String,
    i64 => Int,
    f64 => Float,
    bool => Bool,
    Value => Json,
    Vec<String> => List,
    BTreeSet<String> => Set,
    Url => Url,
    Regex => Regex,
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        EnvValue::String(value.to_owned())
    }
}

/// Narrowing from [`EnvValue`] to the output type of a typed accessor.
///
/// On mismatch the original value is handed back so the caller can report
/// what was produced instead.
pub(crate) trait FromEnvValue: Sized {
    const EXPECTED: &'static str;

    fn from_env_value(value: EnvValue) -> Result<Self, EnvValue>;
}

macro_rules! impl_from_env_value {
    ($($ty:ty, $expected:literal, $variant:ident);* $(;)?) => {
        $(
            impl FromEnvValue for $ty {
                const EXPECTED: &'static str = $expected;

                fn from_env_value(value: EnvValue) -> Result<Self, EnvValue> {
                    match value {
                        EnvValue::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_from_env_value! {
    String, "a string", String;
    i64, "an integer", Int;
    f64, "a float", Float;
    bool, "a boolean", Bool;
    Value, "a JSON value", Json;
    Vec<String>, "a list", List;
    BTreeSet<String>, "a set", Set;
    Url, "a URL", Url;
    Regex, "a regular expression", Regex;
}

impl FromEnvValue for EnvValue {
    const EXPECTED: &'static str = "any value";

    fn from_env_value(value: EnvValue) -> Result<Self, EnvValue> {
        Ok(value)
    }
}

impl FromEnvValue for u16 {
    const EXPECTED: &'static str = "a port number";

    fn from_env_value(value: EnvValue) -> Result<Self, EnvValue> {
        match value {
            EnvValue::Int(n) => u16::try_from(n).map_err(|_| EnvValue::Int(n)),
            other => Err(other),
        }
    }
}

impl FromEnvValue for Vec<Value> {
    const EXPECTED: &'static str = "a JSON array";

    fn from_env_value(value: EnvValue) -> Result<Self, EnvValue> {
        match value {
            EnvValue::Json(Value::Array(items)) => Ok(items),
            other => Err(other),
        }
    }
}

impl FromEnvValue for Map<String, Value> {
    const EXPECTED: &'static str = "a JSON object";

    fn from_env_value(value: EnvValue) -> Result<Self, EnvValue> {
        match value {
            EnvValue::Json(Value::Object(map)) => Ok(map),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_distinguishes_json_shapes() {
        assert_eq!(EnvValue::Json(json!([1])).kind(), "a JSON array");
        assert_eq!(EnvValue::Json(json!({"a": 1})).kind(), "a JSON object");
        assert_eq!(EnvValue::Json(json!(1)).kind(), "a JSON value");
    }

    #[test]
    fn test_narrowing() {
        assert_eq!(i64::from_env_value(EnvValue::Int(7)), Ok(7));
        assert_eq!(
            i64::from_env_value(EnvValue::from("7")),
            Err(EnvValue::String("7".to_string()))
        );
        assert_eq!(u16::from_env_value(EnvValue::Int(65535)), Ok(65535));
        assert!(u16::from_env_value(EnvValue::Int(65536)).is_err());
        assert_eq!(
            Vec::<Value>::from_env_value(EnvValue::Json(json!([1, 2]))),
            Ok(vec![json!(1), json!(2)])
        );
        assert!(Map::<String, Value>::from_env_value(EnvValue::Json(json!([1]))).is_err());
    }

    #[test]
    fn test_regex_equality_by_pattern() {
        let a = EnvValue::Regex(Regex::new("^a+$").unwrap());
        let b = EnvValue::Regex(Regex::new("^a+$").unwrap());
        assert_eq!(a, b);
    }
}
