//! FILENAME: core/format-engine/src/dialect.rs
//! PURPOSE: Translate a native format into the chart and spreadsheet dialects.
//! CONTEXT: Both translations are pure functions of (format, classification, locale).
//! Numeric formats go through a closed lookup table; date/time formats are expanded
//! against the locale and, for the chart dialect, run through the token scanner.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::date_format::{expand_shorthand, substitute_chart_tokens};
use crate::locale::Locale;
use crate::logging::{self, log_debug};

/// The resolved simple kind of an element's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Classification {
    Numeric,
    #[default]
    Text,
    DateTime,
    Enum,
}

/// Chart token used when no equivalent exists.
pub const GENERIC_CHART_FORMAT: &str = "g";

// ============================================================================
// NUMERIC TOKEN TABLE
// ============================================================================

/// A recognized native numeric token and its dialect equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericTokenRule {
    pub native: &'static str,
    pub chart: &'static str,
    pub spreadsheet: &'static str,
}

const fn numeric(native: &'static str, chart: &'static str, spreadsheet: &'static str) -> NumericTokenRule {
    NumericTokenRule { native, chart, spreadsheet }
}

/// Closed table of recognized numeric tokens.
pub static NUMERIC_TOKENS: &[NumericTokenRule] = &[
    numeric("0", ".0f", "0"),
    numeric("N0", ",.0f", "#,##0"),
    numeric("D0", ",.0f", "#,##0"),
    numeric("N1", ",.1f", "#,##0.0"),
    numeric("D1", ",.1f", "#,##0.0"),
    numeric("N2", ",.2f", "#,##0.00"),
    numeric("D2", ",.2f", "#,##0.00"),
    numeric("N3", ",.3f", "#,##0.000"),
    numeric("D3", ",.3f", "#,##0.000"),
    numeric("N4", ",.4f", "#,##0.0000"),
    numeric("D4", ",.4f", "#,##0.0000"),
    numeric("P0", ",.0%", "0%"),
    numeric("P1", ",.1%", "0.0%"),
    numeric("P2", ",.2%", "0.00%"),
    numeric("P3", ",.3%", "0.000%"),
    numeric("P4", ",.4%", "0.0000%"),
    numeric("C0", "$,.0f", "$ #,##0"),
    numeric("C1", "$,.1f", "$ #,##0.0"),
    numeric("C2", "$,.2f", "$ #,##0.00"),
    numeric("C3", "$,.3f", "$ #,##0.000"),
    numeric("C4", "$,.4f", "$ #,##0.0000"),
];

static NUMERIC_LOOKUP: Lazy<HashMap<&'static str, &'static NumericTokenRule>> =
    Lazy::new(|| NUMERIC_TOKENS.iter().map(|rule| (rule.native, rule)).collect());

/// Exact lookup of a native numeric token.
pub fn numeric_rule(format: &str) -> Option<&'static NumericTokenRule> {
    NUMERIC_LOOKUP.get(format).copied()
}

// ============================================================================
// TRANSLATION
// ============================================================================

/// Chart-library (D3 style) format for a native format.
pub fn chart_format(format: &str, classification: Classification, locale: &Locale) -> String {
    match classification {
        Classification::Numeric => match numeric_rule(format) {
            Some(rule) => rule.chart.to_string(),
            None => {
                log_debug!(logging::FORMAT, "no chart equivalent for numeric format '{}'", format);
                GENERIC_CHART_FORMAT.to_string()
            }
        },
        Classification::DateTime => {
            let pattern = expand_shorthand(format, locale);
            substitute_chart_tokens(&pattern).replace('/', &locale.date_separator)
        }
        Classification::Text | Classification::Enum => GENERIC_CHART_FORMAT.to_string(),
    }
}

/// Spreadsheet number format for a native format.
pub fn spreadsheet_format(format: &str, classification: Classification, locale: &Locale) -> String {
    match classification {
        Classification::Numeric => match numeric_rule(format) {
            Some(rule) => rule.spreadsheet.to_string(),
            None => format.to_string(),
        },
        Classification::DateTime => expand_shorthand(format, locale).into_owned(),
        Classification::Text | Classification::Enum => format.to_string(),
    }
}

/// A native format with both dialect translations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedFormats {
    pub native: String,
    pub chart: String,
    pub spreadsheet: String,
}

pub fn translate(format: &str, classification: Classification, locale: &Locale) -> TranslatedFormats {
    TranslatedFormats {
        native: format.to_string(),
        chart: chart_format(format, classification, locale),
        spreadsheet: spreadsheet_format(format, classification, locale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_table_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for rule in NUMERIC_TOKENS {
            assert!(seen.insert(rule.native), "duplicate token {}", rule.native);
        }
        assert_eq!(NUMERIC_LOOKUP.len(), NUMERIC_TOKENS.len());
    }

    #[test]
    fn test_numeric_translation() {
        let locale = Locale::en_us();
        let n2 = translate("N2", Classification::Numeric, &locale);
        assert_eq!(n2.chart, ",.2f");
        assert_eq!(n2.spreadsheet, "#,##0.00");

        let p0 = translate("P0", Classification::Numeric, &locale);
        assert_eq!(p0.chart, ",.0%");
        assert_eq!(p0.spreadsheet, "0%");

        assert_eq!(chart_format("0", Classification::Numeric, &locale), ".0f");
        assert_eq!(chart_format("D3", Classification::Numeric, &locale), ",.3f");
        assert_eq!(spreadsheet_format("C2", Classification::Numeric, &locale), "$ #,##0.00");
        assert_eq!(spreadsheet_format("P3", Classification::Numeric, &locale), "0.000%");
    }

    #[test]
    fn test_numeric_unrecognized_falls_back() {
        let locale = Locale::en_us();
        assert_eq!(chart_format("#,##0.0", Classification::Numeric, &locale), "g");
        assert_eq!(spreadsheet_format("#,##0.0", Classification::Numeric, &locale), "#,##0.0");
        // Lookup is exact, lowercase variants are not recognized
        assert_eq!(chart_format("n2", Classification::Numeric, &locale), "g");
    }

    #[test]
    fn test_datetime_shorthand_translation() {
        let mut locale = Locale::en_us();
        locale.short_date_pattern = "MM/dd/yyyy".to_string();
        locale.date_separator = "-".to_string();

        let chart = chart_format("d", Classification::DateTime, &locale);
        assert_eq!(chart, "%m-%d-%Y");
        assert_eq!(spreadsheet_format("d", Classification::DateTime, &locale), "MM/dd/yyyy");
    }

    #[test]
    fn test_datetime_combined_shorthand() {
        let locale = Locale::en_gb();
        assert_eq!(
            chart_format("g", Classification::DateTime, &locale),
            "%d/%m/%Y %H:%M"
        );
        assert_eq!(
            spreadsheet_format("F", Classification::DateTime, &locale),
            "dd MMMM yyyy HH:mm:ss"
        );
    }

    #[test]
    fn test_datetime_custom_pattern() {
        let locale = Locale::de_de();
        assert_eq!(
            chart_format("yyyy/MM/dd HH:mm", Classification::DateTime, &locale),
            "%Y.%m.%d %H:%M"
        );
        assert_eq!(
            spreadsheet_format("yyyy/MM/dd HH:mm", Classification::DateTime, &locale),
            "yyyy/MM/dd HH:mm"
        );
    }

    #[test]
    fn test_text_and_enum() {
        let locale = Locale::invariant();
        assert_eq!(chart_format("@", Classification::Text, &locale), GENERIC_CHART_FORMAT);
        assert_eq!(spreadsheet_format("@", Classification::Text, &locale), "@");
        assert_eq!(chart_format("N2", Classification::Enum, &locale), GENERIC_CHART_FORMAT);
        assert_eq!(spreadsheet_format("N2", Classification::Enum, &locale), "N2");
    }

    #[test]
    fn test_translation_is_deterministic() {
        let locale = Locale::fr_fr();
        for format in ["N2", "P1", "C4", "d", "F", "HH:mm", "unknown"] {
            for classification in [Classification::Numeric, Classification::DateTime, Classification::Text] {
                assert_eq!(
                    translate(format, classification, &locale),
                    translate(format, classification, &locale)
                );
            }
        }
    }
}
