//! Floating point conversions
//!
//! A string is convertible when it parses and the result is finite at the
//! target width, so `1e39` is an `f64` but not an `f32`.

use super::{FromValue, ToValue};
use crate::error::ConversionError;

macro_rules! impl_float {
    ($($ty:ident),+) => {
        $(
            impl FromValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn is_convertible(value: &str) -> bool {
                    value.parse::<$ty>().is_ok_and(|n| n.is_finite())
                }

                fn parse(value: &str) -> Result<Self, ConversionError> {
                    value
                        .parse::<$ty>()
                        .ok()
                        .filter(|n| n.is_finite())
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

impl_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(f64::parse("-124.45667356"), Ok(-124.45667356));
        assert_eq!(f64::parse("4.123456545"), Ok(4.123456545));
        assert_eq!(f64::parse("1e3"), Ok(1000.0));
        assert_eq!(f32::parse("-1.5"), Ok(-1.5));
        assert_eq!(f64::parse("42"), Ok(42.0));
    }

    #[test]
    fn test_range() {
        assert!(f64::is_convertible("1e39"));
        assert!(!f32::is_convertible("1e39"));
        assert!(!f64::is_convertible("1e400"));
        assert!(!f64::is_convertible("inf"));
        assert!(!f64::is_convertible("NaN"));
    }

    #[test]
    fn test_malformed() {
        for value in ["", "abc", "1.2.3", "0x1p3", "1,5"] {
            assert!(!f64::is_convertible(value), "{value}");
            assert!(f64::parse(value).is_err(), "{value}");
        }
    }

    #[test]
    fn test_format_round_trips() {
        assert_eq!(0.1f64.to_value_string(), "0.1");
        assert_eq!((-1.1245864f64).to_value_string(), "-1.1245864");
        assert_eq!(2.0f32.to_value_string(), "2");
        let formatted = std::f64::consts::PI.to_value_string();
        assert_eq!(f64::parse(&formatted), Ok(std::f64::consts::PI));
    }
}
