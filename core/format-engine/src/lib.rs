//! FILENAME: core/format-engine/src/lib.rs
//! PURPOSE: Native format handling for report elements.
//! CONTEXT: Formats raw values for display and translates native format strings
//! into the chart-library and spreadsheet dialects.
//!
//! Layers:
//! - `number_format` / `date_format`: native grammars (HOW values are rendered)
//! - `dialect`: chart and spreadsheet translations (WHAT other layers receive)
//! - `locale`: culture data both depend on

pub mod date_format;
pub mod dialect;
pub mod display;
pub mod error;
pub mod locale;
pub mod logging;
pub mod number_format;
pub mod value;

#[doc(hidden)]
pub use log as __log;

// Re-export commonly used types at the crate root
pub use date_format::{expand_shorthand, format_datetime, scan, DatePart, Segment, TokenRule};
pub use dialect::{
    chart_format, numeric_rule, spreadsheet_format, translate, Classification, NumericTokenRule,
    TranslatedFormats, GENERIC_CHART_FORMAT,
};
pub use display::{format_value, format_value_or_default};
pub use error::FormatError;
pub use locale::{CurrencyPosition, Locale};
pub use number_format::{format_integer, format_number, NumericFormat, StandardSpecifier};
pub use value::RawValue;
