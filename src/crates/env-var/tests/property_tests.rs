//! Property-based tests for the integer and array accessors.

use env_var::accessors::{as_array, as_int};
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Property: asInt undoes decimal formatting for every i64.
    #[test]
    fn as_int_inverts_integer_formatting(n in any::<i64>()) {
        prop_assert_eq!(as_int(&n.to_string()).unwrap(), n);
    }

    /// Property: the same holds when read through a binding.
    #[test]
    fn bound_as_int_inverts_integer_formatting(n in any::<i64>()) {
        let env = env_var::from(HashMap::from([("N".to_string(), n.to_string())]));
        prop_assert_eq!(env.get("N").required().unwrap().as_int().unwrap(), n);
    }

    /// Property: a decimal point makes any integer string invalid.
    #[test]
    fn as_int_rejects_decimal_point(whole in any::<i32>(), fraction in 0u32..1000) {
        let value = format!("{}.{}", whole, fraction);
        prop_assert!(as_int(&value).is_err(), "{} parsed as an integer", value);
    }

    /// Property: trailing non-digit text makes any integer string invalid.
    #[test]
    fn as_int_rejects_trailing_text(n in any::<i64>(), suffix in "[a-zA-Z_.]{1,4}") {
        let value = format!("{}{}", n, suffix);
        prop_assert!(as_int(&value).is_err(), "{} parsed as an integer", value);
    }

    /// Property: joining items with a delimiter and splitting again gives
    /// the items back.
    #[test]
    fn as_array_splits_what_was_joined(items in prop::collection::vec("[a-z0-9]{1,8}", 1..8)) {
        let joined = items.join(",");
        prop_assert_eq!(as_array(&joined, ",").unwrap(), items);
    }
}
