//! Built-in accessor catalog
//!
//! Each accessor is a pure function from a raw string (plus
//! optional arguments) to a typed value. The functions are public so that
//! extension accessors can build on them:
//!
//! ```rust
//! use env_var::accessors;
//! use env_var::{EnvValue, Extensions, Rejected};
//!
//! let extensions = Extensions::new().with("asEvenInt", |value, _args| {
//!     let n = accessors::as_int(value)?;
//!     if n % 2 == 0 {
//!         Ok(EnvValue::Int(n))
//!     } else {
//!         Err(Rejected::new("should be an even integer").into())
//!     }
//! });
//! # let _ = extensions;
//! ```
//!
//! Registered under their `as<Type>` names, the same functions are reached
//! through [`BuiltinAccessor`].

use crate::error::{BoxError, Rejected};
use crate::registry::Accessor;
use crate::value::EnvValue;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use url::Url;

/// Delimiter used by `asArray` and `asSet` when none is given.
pub const DEFAULT_DELIMITER: &str = ",";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").unwrap());

type AccessResult<T> = Result<T, Rejected>;

/// Accept any value unchanged
///
/// # Arguments
///
/// * `value` - Raw variable value
///
/// # Returns
///
/// * `Ok(String)` - always, with the value copied as-is
pub fn as_string(value: &str) -> AccessResult<String> {
    Ok(value.to_owned())
}

/// Parse a strict base-10 integer
///
/// Surrounding whitespace is ignored; anything else (a decimal point,
/// trailing letters) is rejected.
///
/// # Arguments
///
/// * `value` - Raw variable value
///
/// # Returns
///
/// * `Ok(i64)` if the trimmed value is a complete integer literal
/// * `Err` with "should be a valid integer" otherwise
pub fn as_int(value: &str) -> AccessResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|e| Rejected::with_source("should be a valid integer", e))
}

/// Parse an integer greater than zero
///
/// # Returns
///
/// * `Ok(i64)` if the value is an integer and `> 0`
/// * `Err` naming the parsed value if it is zero or negative
pub fn as_int_positive(value: &str) -> AccessResult<i64> {
    let n = as_int(value)?;
    if n > 0 {
        Ok(n)
    } else {
        Err(Rejected::new(format!("should be a positive integer (got {})", n)))
    }
}

/// Parse an integer less than zero
///
/// # Returns
///
/// * `Ok(i64)` if the value is an integer and `< 0`
/// * `Err` naming the parsed value if it is zero or positive
pub fn as_int_negative(value: &str) -> AccessResult<i64> {
    let n = as_int(value)?;
    if n < 0 {
        Ok(n)
    } else {
        Err(Rejected::new(format!("should be a negative integer (got {})", n)))
    }
}

/// Parse a strict, finite float
///
/// # Arguments
///
/// * `value` - Raw variable value; surrounding whitespace is ignored
///
/// # Returns
///
/// * `Ok(f64)` for any finite float literal (`1.5`, `-2`, `1e3`)
/// * `Err` for trailing text, `NaN` and infinities
pub fn as_float(value: &str) -> AccessResult<f64> {
    let n = value
        .trim()
        .parse::<f64>()
        .map_err(|e| Rejected::with_source("should be a valid float", e))?;

    if n.is_finite() {
        Ok(n)
    } else {
        Err(Rejected::new("should be a valid float"))
    }
}

/// Parse a finite float greater than zero
pub fn as_float_positive(value: &str) -> AccessResult<f64> {
    let n = as_float(value)?;
    if n > 0.0 {
        Ok(n)
    } else {
        Err(Rejected::new(format!("should be a positive float (got {})", n)))
    }
}

/// Parse a finite float less than zero
pub fn as_float_negative(value: &str) -> AccessResult<f64> {
    let n = as_float(value)?;
    if n < 0.0 {
        Ok(n)
    } else {
        Err(Rejected::new(format!("should be a negative float (got {})", n)))
    }
}

/// Parse a TCP/UDP port number
///
/// # Returns
///
/// * `Ok(u16)` for integers in `0..=65535`
/// * `Err` for non-integers and integers outside that range
pub fn as_port_number(value: &str) -> AccessResult<u16> {
    let n = as_int(value)?;
    u16::try_from(n).map_err(|_| {
        Rejected::new(format!(
            "should be a port number between 0 and {} (got {})",
            u16::MAX,
            n
        ))
    })
}

/// Parse a lenient boolean
///
/// # Returns
///
/// * `Ok(true)` for `true` or `1`, `Ok(false)` for `false` or `0`
///   (case-insensitive)
/// * `Err` for anything else, including the empty string
pub fn as_bool(value: &str) -> AccessResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(Rejected::new(
            "should be either \"true\", \"false\", \"1\", or \"0\" (case-insensitive)",
        )),
    }
}

/// Parse a strict boolean
///
/// # Returns
///
/// * `Ok(bool)` for `true` or `false` (case-insensitive)
/// * `Err` for anything else; `1` and `0` are rejected
pub fn as_bool_strict(value: &str) -> AccessResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Rejected::new(
            "should be either \"true\" or \"false\" (case-insensitive)",
        )),
    }
}

/// Accept one of a fixed set of values
///
/// # Arguments
///
/// * `value` - Raw variable value
/// * `valid_values` - Permitted values, compared exactly
///
/// # Returns
///
/// * `Ok(String)` if `value` is one of `valid_values`
/// * `Err` listing the permitted values otherwise
pub fn as_enum(value: &str, valid_values: &[&str]) -> AccessResult<String> {
    if valid_values.iter().any(|valid| *valid == value) {
        Ok(value.to_owned())
    } else {
        Err(Rejected::new(format!(
            "should be one of [{}]",
            valid_values.join(", ")
        )))
    }
}

/// Parse any JSON document
///
/// # Returns
///
/// * `Ok(Value)` for valid JSON
/// * `Err` carrying the `serde_json` error as its source
pub fn as_json(value: &str) -> AccessResult<Value> {
    serde_json::from_str(value)
        .map_err(|e| Rejected::with_source("should be valid (parseable) JSON", e))
}

/// Parse a JSON array
///
/// # Returns
///
/// * `Ok(Vec<Value>)` if the document is an array
/// * `Err` if it is invalid JSON or another JSON type
pub fn as_json_array(value: &str) -> AccessResult<Vec<Value>> {
    match as_json(value)? {
        Value::Array(items) => Ok(items),
        _ => Err(Rejected::new("should be a parseable JSON Array")),
    }
}

/// Parse a JSON object
///
/// # Returns
///
/// * `Ok(Map)` if the document is an object
/// * `Err` if it is invalid JSON or another JSON type
pub fn as_json_object(value: &str) -> AccessResult<Map<String, Value>> {
    match as_json(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(Rejected::new("should be a parseable JSON Object")),
    }
}

/// Split a value into a list
///
/// # Arguments
///
/// * `value` - Raw variable value
/// * `delimiter` - Separator; must not be empty
///
/// # Returns
///
/// * `Ok(vec![])` for an empty value
/// * `Ok(items)` split on every occurrence of `delimiter`; empty segments
///   between delimiters are kept
/// * `Err` if `delimiter` is empty
pub fn as_array(value: &str, delimiter: &str) -> AccessResult<Vec<String>> {
    if delimiter.is_empty() {
        return Err(Rejected::new("array delimiter must not be empty"));
    }
    if value.is_empty() {
        return Ok(Vec::new());
    }
    Ok(value.split(delimiter).map(str::to_owned).collect())
}

/// Split a value into a sorted set, dropping duplicates
///
/// Same splitting rules as [`as_array`].
pub fn as_set(value: &str, delimiter: &str) -> AccessResult<BTreeSet<String>> {
    Ok(as_array(value, delimiter)?.into_iter().collect())
}

/// Parse an absolute URL
///
/// # Returns
///
/// * `Ok(Url)` if the value parses without a base
/// * `Err` carrying the `url` parse error as its source
pub fn as_url_object(value: &str) -> AccessResult<Url> {
    Url::parse(value).map_err(|e| Rejected::with_source("should be a valid URL", e))
}

/// Parse an absolute URL and return its normalized serialization
///
/// `https://example.com` becomes `https://example.com/`.
pub fn as_url_string(value: &str) -> AccessResult<String> {
    as_url_object(value).map(String::from)
}

/// Accept a value shaped like `local@domain.tld`
///
/// # Returns
///
/// * `Ok(String)` with the value unchanged when it looks like an address
/// * `Err` otherwise
pub fn as_email_string(value: &str) -> AccessResult<String> {
    if EMAIL_REGEX.is_match(value) {
        Ok(value.to_owned())
    } else {
        Err(Rejected::new("should be a valid email address"))
    }
}

/// Compile the value as a regular expression
///
/// # Arguments
///
/// * `value` - Pattern in `regex` syntax
/// * `flags` - Any of `i`, `m`, `s`, `x` and `U`, each at most once; applied
///   as an inline flag group in front of the pattern
///
/// # Returns
///
/// * `Ok(Regex)` for a valid pattern and flag set
/// * `Err` naming an unknown or repeated flag, or carrying the `regex`
///   error as its source
pub fn as_regex(value: &str, flags: &str) -> AccessResult<Regex> {
    let mut seen = BTreeSet::new();
    for flag in flags.chars() {
        if !matches!(flag, 'i' | 'm' | 's' | 'x' | 'U') {
            return Err(Rejected::new(format!(
                "unsupported regular expression flag '{}'",
                flag
            )));
        }
        if !seen.insert(flag) {
            return Err(Rejected::new(format!(
                "regular expression flag '{}' is given more than once",
                flag
            )));
        }
    }

    let pattern = if flags.is_empty() {
        value.to_owned()
    } else {
        format!("(?{}){}", flags, value)
    };

    Regex::new(&pattern)
        .map_err(|e| Rejected::with_source("should be a valid regular expression", e))
}

/// The fixed set of accessors every binding starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinAccessor {
    String,
    Int,
    IntPositive,
    IntNegative,
    Float,
    FloatPositive,
    FloatNegative,
    PortNumber,
    Bool,
    BoolStrict,
    Enum,
    Json,
    JsonArray,
    JsonObject,
    Array,
    Set,
    UrlString,
    UrlObject,
    EmailString,
    RegExp,
}

impl BuiltinAccessor {
    pub const ALL: [BuiltinAccessor; 20] = [
        BuiltinAccessor::String,
        BuiltinAccessor::Int,
        BuiltinAccessor::IntPositive,
        BuiltinAccessor::IntNegative,
        BuiltinAccessor::Float,
        BuiltinAccessor::FloatPositive,
        BuiltinAccessor::FloatNegative,
        BuiltinAccessor::PortNumber,
        BuiltinAccessor::Bool,
        BuiltinAccessor::BoolStrict,
        BuiltinAccessor::Enum,
        BuiltinAccessor::Json,
        BuiltinAccessor::JsonArray,
        BuiltinAccessor::JsonObject,
        BuiltinAccessor::Array,
        BuiltinAccessor::Set,
        BuiltinAccessor::UrlString,
        BuiltinAccessor::UrlObject,
        BuiltinAccessor::EmailString,
        BuiltinAccessor::RegExp,
    ];

    /// Registry name.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinAccessor::String => "asString",
            BuiltinAccessor::Int => "asInt",
            BuiltinAccessor::IntPositive => "asIntPositive",
            BuiltinAccessor::IntNegative => "asIntNegative",
            BuiltinAccessor::Float => "asFloat",
            BuiltinAccessor::FloatPositive => "asFloatPositive",
            BuiltinAccessor::FloatNegative => "asFloatNegative",
            BuiltinAccessor::PortNumber => "asPortNumber",
            BuiltinAccessor::Bool => "asBool",
            BuiltinAccessor::BoolStrict => "asBoolStrict",
            BuiltinAccessor::Enum => "asEnum",
            BuiltinAccessor::Json => "asJson",
            BuiltinAccessor::JsonArray => "asJsonArray",
            BuiltinAccessor::JsonObject => "asJsonObject",
            BuiltinAccessor::Array => "asArray",
            BuiltinAccessor::Set => "asSet",
            BuiltinAccessor::UrlString => "asUrlString",
            BuiltinAccessor::UrlObject => "asUrlObject",
            BuiltinAccessor::EmailString => "asEmailString",
            BuiltinAccessor::RegExp => "asRegExp",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|accessor| accessor.name() == name)
    }

    /// Run the accessor.
    ///
    /// `asEnum` treats every argument as a permitted value; `asArray` and
    /// `asSet` take an optional delimiter; `asRegExp` takes optional flags.
    /// Other accessors ignore their arguments.
    pub fn apply(self, value: &str, args: &[&str]) -> Result<EnvValue, Rejected> {
        let first = args.first().copied();

        Ok(match self {
            BuiltinAccessor::String => as_string(value)?.into(),
            BuiltinAccessor::Int => as_int(value)?.into(),
            BuiltinAccessor::IntPositive => as_int_positive(value)?.into(),
            BuiltinAccessor::IntNegative => as_int_negative(value)?.into(),
            BuiltinAccessor::Float => as_float(value)?.into(),
            BuiltinAccessor::FloatPositive => as_float_positive(value)?.into(),
            BuiltinAccessor::FloatNegative => as_float_negative(value)?.into(),
            BuiltinAccessor::PortNumber => EnvValue::Int(i64::from(as_port_number(value)?)),
            BuiltinAccessor::Bool => as_bool(value)?.into(),
            BuiltinAccessor::BoolStrict => as_bool_strict(value)?.into(),
            BuiltinAccessor::Enum => as_enum(value, args)?.into(),
            BuiltinAccessor::Json => as_json(value)?.into(),
            BuiltinAccessor::JsonArray => Value::Array(as_json_array(value)?).into(),
            BuiltinAccessor::JsonObject => Value::Object(as_json_object(value)?).into(),
            BuiltinAccessor::Array => {
                as_array(value, first.unwrap_or(DEFAULT_DELIMITER))?.into()
            }
            BuiltinAccessor::Set => as_set(value, first.unwrap_or(DEFAULT_DELIMITER))?.into(),
            BuiltinAccessor::UrlString => as_url_string(value)?.into(),
            BuiltinAccessor::UrlObject => as_url_object(value)?.into(),
            BuiltinAccessor::EmailString => as_email_string(value)?.into(),
            BuiltinAccessor::RegExp => as_regex(value, first.unwrap_or(""))?.into(),
        })
    }
}

impl Accessor for BuiltinAccessor {
    fn access(&self, value: &str, args: &[&str]) -> Result<EnvValue, BoxError> {
        self.apply(value, args).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_int_strict() {
        assert_eq!(as_int("42").unwrap(), 42);
        assert_eq!(as_int(" -17 ").unwrap(), -17);
        assert!(as_int("1.2").is_err());
        assert!(as_int("12abc").is_err());
        assert!(as_int("").is_err());
        assert_eq!(as_int("1.2").unwrap_err().message(), "should be a valid integer");
    }

    #[test]
    fn test_int_sign_constraints() {
        assert_eq!(as_int_positive("5").unwrap(), 5);
        assert!(as_int_positive("0").is_err());
        assert!(as_int_positive("-5").is_err());

        assert_eq!(as_int_negative("-5").unwrap(), -5);
        assert!(as_int_negative("0").is_err());
        assert!(as_int_negative("5").is_err());
    }

    #[test]
    fn test_as_float() {
        assert_eq!(as_float("1.5").unwrap(), 1.5);
        assert_eq!(as_float("-2").unwrap(), -2.0);
        assert_eq!(as_float("1e3").unwrap(), 1000.0);
        assert!(as_float("1.5x").is_err());
        assert!(as_float("NaN").is_err());
        assert!(as_float("inf").is_err());

        assert!(as_float_positive("0.1").is_ok());
        assert!(as_float_positive("0").is_err());
        assert!(as_float_negative("-0.1").is_ok());
        assert!(as_float_negative("0").is_err());
    }

    #[test]
    fn test_as_port_number_bounds() {
        assert_eq!(as_port_number("0").unwrap(), 0);
        assert_eq!(as_port_number("65535").unwrap(), 65535);
        assert!(as_port_number("-1").is_err());
        assert!(as_port_number("65536").is_err());
        assert!(as_port_number("http").is_err());
    }

    #[test]
    fn test_as_bool() {
        for (value, expected) in [
            ("true", true),
            ("TRUE", true),
            ("1", true),
            ("false", false),
            ("FALSE", false),
            ("0", false),
        ] {
            assert_eq!(as_bool(value).unwrap(), expected, "Failed for value: {}", value);
        }
        assert!(as_bool("").is_err());
        assert!(as_bool("yes").is_err());
    }

    #[test]
    fn test_as_bool_strict() {
        assert!(as_bool_strict("True").unwrap());
        assert!(!as_bool_strict("fAlSe").unwrap());
        assert!(as_bool_strict("1").is_err());
        assert!(as_bool_strict("0").is_err());
    }

    #[test]
    fn test_as_enum() {
        assert_eq!(as_enum("a", &["a", "b"]).unwrap(), "a");

        let err = as_enum("c", &["a", "b"]).unwrap_err();
        assert_eq!(err.message(), "should be one of [a, b]");
    }

    #[test]
    fn test_json_shapes() {
        assert_eq!(as_json("3").unwrap(), json!(3));
        assert!(as_json("{").is_err());

        assert_eq!(as_json_array("[1,2]").unwrap(), vec![json!(1), json!(2)]);
        assert!(as_json_array("{}").is_err());

        assert_eq!(as_json_object(r#"{"a":1}"#).unwrap()["a"], json!(1));
        assert!(as_json_object("[]").is_err());
        assert!(as_json_object("1").is_err());
    }

    #[test]
    fn test_as_array() {
        assert!(as_array("", ",").unwrap().is_empty());
        assert_eq!(as_array("1", ",").unwrap(), vec!["1"]);
        assert_eq!(as_array("1,2,3", ",").unwrap(), vec!["1", "2", "3"]);
        assert_eq!(as_array("1-2-3", "-").unwrap(), vec!["1", "2", "3"]);
        assert_eq!(as_array("a,,b", ",").unwrap(), vec!["a", "", "b"]);
        assert!(as_array("a", "").is_err());
    }

    #[test]
    fn test_as_set_removes_duplicates() {
        let set = as_set("b,a,b", ",").unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            as_url_string("https://example.com").unwrap(),
            "https://example.com/"
        );
        assert_eq!(
            as_url_object("postgres://db:5432/app").unwrap().port(),
            Some(5432)
        );
        assert!(as_url_string("example.com").is_err());
    }

    #[test]
    fn test_as_email_string() {
        assert!(as_email_string("ops@example.com").is_ok());
        assert!(as_email_string("ops@example").is_err());
        assert!(as_email_string("not an email").is_err());
    }

    #[test]
    fn test_as_regex() {
        assert!(as_regex("^a+$", "").unwrap().is_match("aaa"));
        assert!(as_regex("^a+$", "i").unwrap().is_match("AAA"));
        assert!(as_regex("(", "").is_err());
        assert!(as_regex("a", "g").is_err());
    }

    #[test]
    fn test_as_regex_flag_errors_name_the_flag() {
        let err = as_regex("a", "g").unwrap_err();
        assert_eq!(err.message(), "unsupported regular expression flag 'g'");

        let err = as_regex("a", "imi").unwrap_err();
        assert_eq!(err.message(), "regular expression flag 'i' is given more than once");

        assert!(as_regex("^a$", "imsx").unwrap().is_match("A"));
    }

    #[test]
    fn test_names_round_trip() {
        for accessor in BuiltinAccessor::ALL {
            assert_eq!(BuiltinAccessor::from_name(accessor.name()), Some(accessor));
        }
        assert_eq!(BuiltinAccessor::from_name("asNothing"), None);
    }

    #[test]
    fn test_apply_uses_arguments() {
        assert_eq!(
            BuiltinAccessor::Array.apply("a|b", &["|"]).unwrap(),
            EnvValue::List(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            BuiltinAccessor::Array.apply("a,b", &[]).unwrap(),
            EnvValue::List(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            BuiltinAccessor::Enum.apply("dev", &["dev", "prod"]).unwrap(),
            EnvValue::String("dev".to_string())
        );
        assert_eq!(
            BuiltinAccessor::PortNumber.apply("8080", &[]).unwrap(),
            EnvValue::Int(8080)
        );
    }
}
