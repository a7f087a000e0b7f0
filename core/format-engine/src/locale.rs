//! FILENAME: core/format-engine/src/locale.rs
//! PURPOSE: Locale provider consumed by formatting and dialect translation.
//! CONTEXT: A locale is plain data (patterns and separators). Patterns use the
//! native date/time token grammar, where `/` stands for the date separator.

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::logging::{self, log_debug};

/// Position of currency symbol relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyPosition {
    #[default]
    Before, // $100
    After,  // 100 €
}

/// Culture data needed to expand shorthand formats and render values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    /// BCP-47 style name, e.g. "en-US". Empty for the invariant locale.
    pub name: String,
    pub short_date_pattern: String,
    pub long_date_pattern: String,
    pub short_time_pattern: String,
    pub long_time_pattern: String,
    pub date_separator: String,
    pub decimal_separator: String,
    pub group_separator: String,
    pub currency_symbol: String,
    #[serde(default)]
    pub currency_position: CurrencyPosition,
    #[serde(default = "default_am")]
    pub am_designator: String,
    #[serde(default = "default_pm")]
    pub pm_designator: String,
}

fn default_am() -> String {
    "AM".to_string()
}

fn default_pm() -> String {
    "PM".to_string()
}

impl Default for Locale {
    fn default() -> Self {
        Locale::invariant()
    }
}

impl Locale {
    /// Culture-independent locale.
    pub fn invariant() -> Self {
        Locale {
            name: String::new(),
            short_date_pattern: "MM/dd/yyyy".to_string(),
            long_date_pattern: "dddd, dd MMMM yyyy".to_string(),
            short_time_pattern: "HH:mm".to_string(),
            long_time_pattern: "HH:mm:ss".to_string(),
            date_separator: "/".to_string(),
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            currency_symbol: "¤".to_string(),
            currency_position: CurrencyPosition::Before,
            am_designator: default_am(),
            pm_designator: default_pm(),
        }
    }

    pub fn en_us() -> Self {
        Locale {
            name: "en-US".to_string(),
            short_date_pattern: "M/d/yyyy".to_string(),
            long_date_pattern: "dddd, MMMM d, yyyy".to_string(),
            short_time_pattern: "h:mm tt".to_string(),
            long_time_pattern: "h:mm:ss tt".to_string(),
            currency_symbol: "$".to_string(),
            ..Locale::invariant()
        }
    }

    pub fn en_gb() -> Self {
        Locale {
            name: "en-GB".to_string(),
            short_date_pattern: "dd/MM/yyyy".to_string(),
            long_date_pattern: "dd MMMM yyyy".to_string(),
            currency_symbol: "£".to_string(),
            am_designator: "am".to_string(),
            pm_designator: "pm".to_string(),
            ..Locale::invariant()
        }
    }

    pub fn fr_fr() -> Self {
        Locale {
            name: "fr-FR".to_string(),
            short_date_pattern: "dd/MM/yyyy".to_string(),
            long_date_pattern: "dddd d MMMM yyyy".to_string(),
            decimal_separator: ",".to_string(),
            group_separator: "\u{a0}".to_string(),
            currency_symbol: " €".to_string(),
            currency_position: CurrencyPosition::After,
            ..Locale::invariant()
        }
    }

    pub fn de_de() -> Self {
        Locale {
            name: "de-DE".to_string(),
            short_date_pattern: "dd.MM.yyyy".to_string(),
            long_date_pattern: "dddd, d. MMMM yyyy".to_string(),
            date_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            group_separator: ".".to_string(),
            currency_symbol: " €".to_string(),
            currency_position: CurrencyPosition::After,
            ..Locale::invariant()
        }
    }

    /// All built-in locales, invariant first.
    pub fn presets() -> Vec<Locale> {
        vec![
            Locale::invariant(),
            Locale::en_us(),
            Locale::en_gb(),
            Locale::fr_fr(),
            Locale::de_de(),
        ]
    }

    /// Resolve a locale tag such as "fr-FR", "fr_FR.UTF-8" or "de".
    /// Exact matches win; otherwise the first preset sharing the language is used.
    pub fn from_tag(tag: &str) -> Result<Locale, FormatError> {
        let normalized = tag
            .split('.')
            .next()
            .unwrap_or_default()
            .trim()
            .replace('_', "-");

        if normalized.is_empty() || normalized.eq_ignore_ascii_case("invariant") {
            return Ok(Locale::invariant());
        }

        let presets = Locale::presets();
        if let Some(exact) = presets
            .iter()
            .find(|l| !l.name.is_empty() && l.name.eq_ignore_ascii_case(&normalized))
        {
            return Ok(exact.clone());
        }

        let language = normalized.split('-').next().unwrap_or_default();
        presets
            .into_iter()
            .find(|l| l.language().eq_ignore_ascii_case(language))
            .ok_or_else(|| FormatError::UnknownLocale(tag.to_string()))
    }

    /// Locale of the running system, or invariant when it cannot be detected
    /// or has no built-in preset.
    pub fn system() -> Locale {
        match sys_locale::get_locale() {
            Some(tag) => Locale::from_tag(&tag).unwrap_or_else(|e| {
                log_debug!(logging::LOCALE, "{}, using invariant", e);
                Locale::invariant()
            }),
            None => Locale::invariant(),
        }
    }

    /// Language subtag ("en" for "en-US").
    pub fn language(&self) -> &str {
        self.name.split('-').next().unwrap_or_default()
    }

    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }
}
