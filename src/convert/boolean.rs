//! Boolean conversions: `true/yes/on/1` and `false/no/off/0`, in any case

use super::{FromValue, ToValue};
use crate::error::ConversionError;

const TRUE_FORMS: [&str; 4] = ["TRUE", "YES", "ON", "1"];
const FALSE_FORMS: [&str; 4] = ["FALSE", "NO", "OFF", "0"];

fn recognize(value: &str) -> Option<bool> {
    if TRUE_FORMS.iter().any(|form| value.eq_ignore_ascii_case(form)) {
        Some(true)
    } else if FALSE_FORMS.iter().any(|form| value.eq_ignore_ascii_case(form)) {
        Some(false)
    } else {
        None
    }
}

impl FromValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn is_convertible(value: &str) -> bool {
        recognize(value).is_some()
    }

    fn parse(value: &str) -> Result<Self, ConversionError> {
        recognize(value).ok_or_else(|| ConversionError::new(value, Self::TYPE_NAME))
    }
}

impl ToValue for bool {
    fn to_value_string(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }
}
