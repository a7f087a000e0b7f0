//! FILENAME: core/format-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unsupported standard format specifier: {0}")]
    UnsupportedSpecifier(String),

    #[error("Precision out of range in format '{0}' (expected 0-99)")]
    PrecisionOutOfRange(String),

    #[error("Format '{0}' is only valid for integral values")]
    IntegralOnly(String),

    #[error("Format '{format}' cannot be applied to a {kind} value")]
    KindMismatch { format: String, kind: &'static str },

    #[error("Date rendering failed for pattern: {0}")]
    DateRender(String),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}
