//! FILENAME: core/format-engine/src/value.rs
//! PURPOSE: Raw result values handed to the display formatter.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single raw value as produced by report execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Empty,
    Number(f64),
    Integer(i64),
    Text(String),
    Boolean(bool),
    DateTime(NaiveDateTime),
}

impl RawValue {
    /// Whether the display layer may apply a format to this value.
    pub fn is_formattable(&self) -> bool {
        matches!(
            self,
            RawValue::Number(_) | RawValue::Integer(_) | RawValue::DateTime(_)
        )
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

/// The default string form, used whenever formatting is not possible.
impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Empty => Ok(()),
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Integer(i) => write!(f, "{}", i),
            RawValue::Text(s) => f.write_str(s),
            RawValue::Boolean(b) => f.write_str(if *b { "True" } else { "False" }),
            RawValue::DateTime(dt) => write!(f, "{}", dt.format("%m/%d/%Y %H:%M:%S")),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Integer(i)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Boolean(b)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(dt: NaiveDateTime) -> Self {
        RawValue::DateTime(dt)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_default_string_form() {
        assert_eq!(RawValue::Empty.to_string(), "");
        assert_eq!(RawValue::Number(2.5).to_string(), "2.5");
        assert_eq!(RawValue::Integer(-7).to_string(), "-7");
        assert_eq!(RawValue::Boolean(true).to_string(), "True");

        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(RawValue::DateTime(dt).to_string(), "03/09/2024 14:05:00");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(RawValue::from(None::<f64>), RawValue::Empty);
        assert_eq!(RawValue::from(Some("a")), RawValue::Text("a".to_string()));
    }
}
