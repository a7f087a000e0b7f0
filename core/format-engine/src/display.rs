//! FILENAME: core/format-engine/src/display.rs
//! PURPOSE: Locale-aware stringification of a raw value with a native format.

use crate::date_format::format_datetime;
use crate::error::FormatError;
use crate::locale::Locale;
use crate::logging::{self, log_debug};
use crate::number_format::{format_integer, format_number};
use crate::value::RawValue;

/// Format a value with a native format. Values that carry no format (text,
/// booleans) use their default string form. Errors come from the numeric and
/// date formatters rejecting the format for this value.
pub fn format_value(value: &RawValue, format: &str, locale: &Locale) -> Result<String, FormatError> {
    match value {
        RawValue::Empty => Ok(String::new()),
        RawValue::Number(n) => format_number(*n, format, locale),
        RawValue::Integer(i) => format_integer(*i, format, locale),
        RawValue::DateTime(dt) => format_datetime(dt, format, locale),
        RawValue::Text(_) | RawValue::Boolean(_) => Ok(value.to_string()),
    }
}

/// Format a value, falling back to its default string form when the format is
/// rejected. The rejection is only logged at debug level.
pub fn format_value_or_default(value: &RawValue, format: &str, locale: &Locale) -> String {
    format_value(value, format, locale).unwrap_or_else(|e| {
        log_debug!(logging::FORMAT, "{}, using raw value", e);
        value.to_string()
    })
}
