//! Typed value conversion registry
//!
//! Every supported type provides the same three operations: a convertibility
//! check, a parse from the canonical string and a format back to it. Reading
//! goes through [`FromValue`], writing through [`ToValue`]. Adding a type means
//! implementing these traits; the parser and document model stay untouched.
//!
//! | Type                           | Accepted text                                   |
//! |--------------------------------|-------------------------------------------------|
//! | `bool`                         | `true/yes/on/1`, `false/no/off/0` (any case)    |
//! | `i8`..`i64`, `u8`..`u64`       | decimal, or `0x` followed by hex digits         |
//! | `f32`, `f64`                   | decimal or exponent form, finite at that width  |
//! | `String`, `Vec<u16>`, `Vec<char>` | anything                                     |

mod boolean;
mod float;
mod integer;
mod string;

use crate::error::ConversionError;

/// Read side of a conversion descriptor
pub trait FromValue: Sized {
    /// Human-readable type name used in conversion errors
    const TYPE_NAME: &'static str;

    /// Returns true if `value` can be parsed as `Self`; never fails
    fn is_convertible(value: &str) -> bool;

    /// Parses `value`, failing with [`ConversionError`] when it is not convertible
    fn parse(value: &str) -> Result<Self, ConversionError>;
}

/// Write side of a conversion descriptor
pub trait ToValue {
    /// Formats `self` as the canonical string stored in a value
    fn to_value_string(&self) -> String;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value_string(&self) -> String {
        (**self).to_value_string()
    }
}

/// Returns true for `0x` followed by at least one hex digit
pub fn is_hex(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Returns true if `value` parses as `T`
pub fn is_convertible<T: FromValue>(value: &str) -> bool {
    T::is_convertible(value)
}

/// Parses `value` as `T`
pub fn parse<T: FromValue>(value: &str) -> Result<T, ConversionError> {
    T::parse(value)
}

/// Formats `value` as its canonical string
pub fn format<T: ToValue + ?Sized>(value: &T) -> String {
    value.to_value_string()
}
