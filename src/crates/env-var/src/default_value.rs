//! Conversion of default values to their raw string form
//!
//! A default passed to [`Env::get_or`](crate::Env::get_or) is stored exactly
//! as if the source had contained it, so it goes through the same accessor
//! as a real value. Only types with one canonical string form can be used:
//!
//! - strings and `char` are used as-is
//! - integers and floats use their `Display` form (`5`, `-3`, `0.25`)
//! - `bool` becomes `"true"` or `"false"`
//! - `url::Url` uses its serialized form

use url::Url;

/// A value usable as a default.
pub trait DefaultValue {
    fn into_raw(self) -> String;
}

impl DefaultValue for &str {
    fn into_raw(self) -> String {
        self.to_owned()
    }
}

impl DefaultValue for String {
    fn into_raw(self) -> String {
        self
    }
}

impl DefaultValue for &String {
    fn into_raw(self) -> String {
        self.clone()
    }
}

impl DefaultValue for char {
    fn into_raw(self) -> String {
        self.to_string()
    }
}

impl DefaultValue for bool {
    fn into_raw(self) -> String {
        self.to_string()
    }
}

impl DefaultValue for Url {
    fn into_raw(self) -> String {
        self.into()
    }
}

impl DefaultValue for &Url {
    fn into_raw(self) -> String {
        self.as_str().to_owned()
    }
}

macro_rules! impl_display_default {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DefaultValue for $ty {
                fn into_raw(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_display_default!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_forms() {
        assert_eq!("abc".into_raw(), "abc");
        assert_eq!(String::from("abc").into_raw(), "abc");
        assert_eq!(5i32.into_raw(), "5");
        assert_eq!((-3i64).into_raw(), "-3");
        assert_eq!(8080u16.into_raw(), "8080");
        assert_eq!(0.25f64.into_raw(), "0.25");
        assert_eq!(true.into_raw(), "true");
        assert_eq!('x'.into_raw(), "x");
        assert_eq!(
            Url::parse("https://example.com").unwrap().into_raw(),
            "https://example.com/"
        );
    }
}
