//! String conversions
//!
//! UTF-8 is the canonical storage encoding. `Vec<u16>` and `Vec<char>` are the
//! UTF-16 and UTF-32 views, transcoded on every read and write.

use super::{FromValue, ToValue};
use crate::error::ConversionError;
use crate::text;

impl FromValue for String {
    const TYPE_NAME: &'static str = "string";

    fn is_convertible(_value: &str) -> bool {
        true
    }

    fn parse(value: &str) -> Result<Self, ConversionError> {
        Ok(value.to_string())
    }
}

impl ToValue for String {
    fn to_value_string(&self) -> String {
        self.clone()
    }
}

impl ToValue for str {
    fn to_value_string(&self) -> String {
        self.to_string()
    }
}

impl ToValue for char {
    fn to_value_string(&self) -> String {
        self.to_string()
    }
}

impl FromValue for Vec<u16> {
    const TYPE_NAME: &'static str = "UTF-16 string";

    fn is_convertible(_value: &str) -> bool {
        true
    }

    fn parse(value: &str) -> Result<Self, ConversionError> {
        Ok(text::decode_utf16(value))
    }
}

impl ToValue for Vec<u16> {
    fn to_value_string(&self) -> String {
        text::encode_utf16(self)
    }
}

impl FromValue for Vec<char> {
    const TYPE_NAME: &'static str = "UTF-32 string";

    fn is_convertible(_value: &str) -> bool {
        true
    }

    fn parse(value: &str) -> Result<Self, ConversionError> {
        Ok(text::decode_utf32(value))
    }
}

impl ToValue for Vec<char> {
    fn to_value_string(&self) -> String {
        text::encode_utf32(self)
    }
}
