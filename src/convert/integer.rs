//! Integer conversions
//!
//! Signed targets parse through an `i64` intermediate and unsigned targets
//! through a `u64` intermediate, then range-check against the target width.

use super::{FromValue, ToValue, is_hex};
use crate::error::ConversionError;

fn parse_i64(value: &str) -> Option<i64> {
    if is_hex(value) {
        i64::from_str_radix(&value[2..], 16).ok()
    } else {
        value.parse::<i64>().ok()
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    if is_hex(value) {
        u64::from_str_radix(&value[2..], 16).ok()
    } else {
        value.parse::<u64>().ok()
    }
}

macro_rules! impl_integer {
    ($intermediate:ident => $($ty:ident),+) => {
        $(
            impl FromValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn is_convertible(value: &str) -> bool {
                    $intermediate(value).is_some_and(|n| $ty::try_from(n).is_ok())
                }

                fn parse(value: &str) -> Result<Self, ConversionError> {
                    $intermediate(value)
                        .and_then(|n| $ty::try_from(n).ok())
                        .ok_or_else(|| ConversionError::new(value, Self::TYPE_NAME))
                }
            }

            impl ToValue for $ty {
                fn to_value_string(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

impl_integer!(parse_i64 => i8, i16, i32, i64);
impl_integer!(parse_u64 => u8, u16, u32, u64);
