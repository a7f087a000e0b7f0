//! FILENAME: core/format-engine/src/date_format.rs
//! PURPOSE: Native date/time patterns: shorthand expansion, token scanning and rendering.
//! CONTEXT: Native patterns are scanned left to right against an ordered table of
//! token families. Within a family, tokens are listed longest first, so the first
//! rule that matches at a position is the longest match. The same scanner drives
//! the chart dialect translation (string outputs) and display rendering
//! (`DatePart` outputs).

use std::borrow::Cow;
use std::fmt::Write;

use chrono::{NaiveDateTime, Timelike};

use crate::error::FormatError;
use crate::locale::Locale;

// ============================================================================
// SHORTHAND EXPANSION
// ============================================================================

/// The eight recognized shorthand tokens.
pub const SHORTHAND_TOKENS: [&str; 8] = ["d", "D", "t", "T", "g", "G", "f", "F"];

/// Expand a shorthand token into the locale's pattern. Custom patterns are returned as-is.
pub fn expand_shorthand<'a>(format: &'a str, locale: &Locale) -> Cow<'a, str> {
    match format {
        "d" => Cow::Owned(locale.short_date_pattern.clone()),
        "D" => Cow::Owned(locale.long_date_pattern.clone()),
        "t" => Cow::Owned(locale.short_time_pattern.clone()),
        "T" => Cow::Owned(locale.long_time_pattern.clone()),
        "g" => Cow::Owned(format!("{} {}", locale.short_date_pattern, locale.short_time_pattern)),
        "G" => Cow::Owned(format!("{} {}", locale.short_date_pattern, locale.long_time_pattern)),
        "f" => Cow::Owned(format!("{} {}", locale.long_date_pattern, locale.short_time_pattern)),
        "F" => Cow::Owned(format!("{} {}", locale.long_date_pattern, locale.long_time_pattern)),
        _ => Cow::Borrowed(format),
    }
}

// ============================================================================
// TOKEN TABLES
// ============================================================================

/// One native token and what it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRule<T> {
    pub native: &'static str,
    pub output: T,
}

const fn rule<T>(native: &'static str, output: T) -> TokenRule<T> {
    TokenRule { native, output }
}

/// Ordered token families. Families are tried in order; rules within a family
/// must be in strictly descending native length.
pub type TokenTable<T> = [&'static [TokenRule<T>]];

/// Native token to chart (D3 time format) directive.
pub static CHART_DATE_TOKENS: &TokenTable<&'static str> = &[
    &[rule("dddd", "%A"), rule("ddd", "%a"), rule("dd", "%d"), rule("d", "%e")],
    &[rule("MMMM", "%B"), rule("MMM", "%b"), rule("MM", "%m"), rule("M", "%m")],
    &[rule("yyyy", "%Y"), rule("yyy", "%Y"), rule("yy", "%y"), rule("y", "%y")],
    &[rule("HH", "%H"), rule("H", "%H")],
    &[rule("hh", "%I"), rule("h", "%I")],
    &[rule("mm", "%M"), rule("m", "%M")],
    &[rule("ss", "%S"), rule("s", "%S")],
    &[rule("FFF", "%L")],
];

/// Renderable date/time components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    DayNameFull,
    DayNameShort,
    Day2,
    Day1,
    MonthNameFull,
    MonthNameShort,
    Month2,
    Month1,
    Year4,
    Year2,
    Year1,
    Hour24Padded,
    Hour24,
    Hour12Padded,
    Hour12,
    Minute2,
    Minute1,
    Second2,
    Second1,
    Millisecond,
    Designator,
}

/// Native token to display component.
pub static DISPLAY_DATE_TOKENS: &TokenTable<DatePart> = &[
    &[
        rule("dddd", DatePart::DayNameFull),
        rule("ddd", DatePart::DayNameShort),
        rule("dd", DatePart::Day2),
        rule("d", DatePart::Day1),
    ],
    &[
        rule("MMMM", DatePart::MonthNameFull),
        rule("MMM", DatePart::MonthNameShort),
        rule("MM", DatePart::Month2),
        rule("M", DatePart::Month1),
    ],
    &[
        rule("yyyy", DatePart::Year4),
        rule("yyy", DatePart::Year4),
        rule("yy", DatePart::Year2),
        rule("y", DatePart::Year1),
    ],
    &[rule("HH", DatePart::Hour24Padded), rule("H", DatePart::Hour24)],
    &[rule("hh", DatePart::Hour12Padded), rule("h", DatePart::Hour12)],
    &[rule("mm", DatePart::Minute2), rule("m", DatePart::Minute1)],
    &[rule("ss", DatePart::Second2), rule("s", DatePart::Second1)],
    &[rule("FFF", DatePart::Millisecond)],
    &[rule("tt", DatePart::Designator)],
];

// ============================================================================
// SCANNER
// ============================================================================

/// Output of scanning a native pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<T> {
    Token(T),
    Literal(char),
}

/// Scan `pattern` left to right, replacing the longest matching token at each
/// position. Characters no rule matches are kept as literals.
pub fn scan<T: Copy>(pattern: &str, table: &TokenTable<T>) -> Vec<Segment<T>> {
    let mut segments = Vec::with_capacity(pattern.len());
    let mut rest = pattern;

    'outer: while let Some(c) = rest.chars().next() {
        for family in table {
            for token in family.iter() {
                if let Some(after) = rest.strip_prefix(token.native) {
                    segments.push(Segment::Token(token.output));
                    rest = after;
                    continue 'outer;
                }
            }
        }
        segments.push(Segment::Literal(c));
        rest = &rest[c.len_utf8()..];
    }
    segments
}

/// Substitute chart directives into a native pattern (no separator handling).
pub fn substitute_chart_tokens(pattern: &str) -> String {
    let mut result = String::with_capacity(pattern.len() * 2);
    for segment in scan(pattern, CHART_DATE_TOKENS) {
        match segment {
            Segment::Token(directive) => result.push_str(directive),
            Segment::Literal(c) => result.push(c),
        }
    }
    result
}

// ============================================================================
// RENDERING
// ============================================================================

/// Render a date/time with a native format (shorthand or custom pattern).
pub fn format_datetime(value: &NaiveDateTime, format: &str, locale: &Locale) -> Result<String, FormatError> {
    let mut chars = format.chars();
    if let (Some(only), None) = (chars.next(), chars.next()) {
        if only.is_ascii_alphabetic() && !SHORTHAND_TOKENS.contains(&format) {
            return Err(FormatError::UnsupportedSpecifier(format.to_string()));
        }
    }

    let pattern = expand_shorthand(format, locale);
    let mut result = String::with_capacity(pattern.len() * 2);

    for segment in scan(&pattern, DISPLAY_DATE_TOKENS) {
        match segment {
            Segment::Token(part) => render_part(&mut result, value, part, locale)
                .map_err(|_| FormatError::DateRender(pattern.to_string()))?,
            Segment::Literal('/') => result.push_str(&locale.date_separator),
            Segment::Literal(c) => result.push(c),
        }
    }
    Ok(result)
}

fn render_part(out: &mut String, value: &NaiveDateTime, part: DatePart, locale: &Locale) -> std::fmt::Result {
    let hour12 = match value.hour() % 12 {
        0 => 12,
        h => h,
    };
    match part {
        DatePart::DayNameFull => write!(out, "{}", value.format("%A")),
        DatePart::DayNameShort => write!(out, "{}", value.format("%a")),
        DatePart::Day2 => write!(out, "{}", value.format("%d")),
        DatePart::Day1 => write!(out, "{}", value.format("%-d")),
        DatePart::MonthNameFull => write!(out, "{}", value.format("%B")),
        DatePart::MonthNameShort => write!(out, "{}", value.format("%b")),
        DatePart::Month2 => write!(out, "{}", value.format("%m")),
        DatePart::Month1 => write!(out, "{}", value.format("%-m")),
        DatePart::Year4 => write!(out, "{}", value.format("%Y")),
        DatePart::Year2 => write!(out, "{}", value.format("%y")),
        DatePart::Year1 => write!(out, "{}", value.format("%-y")),
        DatePart::Hour24Padded => write!(out, "{:02}", value.hour()),
        DatePart::Hour24 => write!(out, "{}", value.hour()),
        DatePart::Hour12Padded => write!(out, "{:02}", hour12),
        DatePart::Hour12 => write!(out, "{}", hour12),
        DatePart::Minute2 => write!(out, "{:02}", value.minute()),
        DatePart::Minute1 => write!(out, "{}", value.minute()),
        DatePart::Second2 => write!(out, "{:02}", value.second()),
        DatePart::Second1 => write!(out, "{}", value.second()),
        DatePart::Millisecond => write!(out, "{:03}", value.nanosecond() / 1_000_000 % 1000),
        DatePart::Designator => {
            let designator = if value.hour() < 12 {
                &locale.am_designator
            } else {
                &locale.pm_designator
            };
            out.write_str(designator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(14, 5, 7, 42)
            .unwrap()
    }

    #[test]
    fn test_table_families_descend_in_length() {
        for family in CHART_DATE_TOKENS.iter() {
            for pair in family.windows(2) {
                assert!(pair[0].native.len() > pair[1].native.len(), "{}", pair[0].native);
            }
        }
        for family in DISPLAY_DATE_TOKENS.iter() {
            for pair in family.windows(2) {
                assert!(pair[0].native.len() > pair[1].native.len(), "{}", pair[0].native);
            }
        }
    }

    #[test]
    fn test_hour_families_stay_distinct() {
        assert_eq!(substitute_chart_tokens("HH hh H h"), "%H %I %H %I");
        let dt = sample();
        let locale = Locale::en_us();
        assert_eq!(format_datetime(&dt, "HH hh H h", &locale).unwrap(), "14 02 14 2");
    }

    #[test]
    fn test_scan_longest_match_wins() {
        assert_eq!(
            scan("dddd", CHART_DATE_TOKENS),
            vec![Segment::Token("%A")]
        );
        // Five d's: the longest token first, then the remainder
        assert_eq!(
            scan("ddddd", CHART_DATE_TOKENS),
            vec![Segment::Token("%A"), Segment::Token("%e")]
        );
        assert_eq!(
            scan("d-x", CHART_DATE_TOKENS),
            vec![Segment::Token("%e"), Segment::Literal('-'), Segment::Literal('x')]
        );
    }

    #[test]
    fn test_substitute_chart_tokens() {
        assert_eq!(substitute_chart_tokens("MM/dd/yyyy"), "%m/%d/%Y");
        assert_eq!(substitute_chart_tokens("dddd, MMMM d, yyyy"), "%A, %B %e, %Y");
        assert_eq!(substitute_chart_tokens("HH:mm:ss.FFF"), "%H:%M:%S.%L");
        assert_eq!(substitute_chart_tokens("h:m:s"), "%I:%M:%S");
        assert_eq!(substitute_chart_tokens("yyy yy y"), "%Y %y %y");
        assert_eq!(substitute_chart_tokens("MMM M"), "%b %m");
    }

    #[test]
    fn test_expand_shorthand() {
        let locale = Locale::en_us();
        assert_eq!(expand_shorthand("d", &locale), "M/d/yyyy");
        assert_eq!(expand_shorthand("g", &locale), "M/d/yyyy h:mm tt");
        assert_eq!(expand_shorthand("F", &locale), "dddd, MMMM d, yyyy h:mm:ss tt");
        assert_eq!(expand_shorthand("yyyy-MM", &locale), "yyyy-MM");
    }

    #[test]
    fn test_format_datetime_patterns() {
        let locale = Locale::en_us();
        let dt = sample();
        assert_eq!(format_datetime(&dt, "d", &locale).unwrap(), "3/9/2024");
        assert_eq!(format_datetime(&dt, "T", &locale).unwrap(), "2:05:07 PM");
        assert_eq!(
            format_datetime(&dt, "D", &locale).unwrap(),
            "Saturday, March 9, 2024"
        );
        assert_eq!(
            format_datetime(&dt, "yyyy-MM-dd HH:mm:ss.FFF", &locale).unwrap(),
            "2024-03-09 14:05:07.042"
        );
    }

    #[test]
    fn test_format_datetime_separator() {
        let dt = sample();
        assert_eq!(format_datetime(&dt, "d", &Locale::de_de()).unwrap(), "09.03.2024");
        assert_eq!(
            format_datetime(&dt, "dd/MM/yy", &Locale::de_de()).unwrap(),
            "09.03.24"
        );
    }

    #[test]
    fn test_format_datetime_rejects_unknown_shorthand() {
        let dt = sample();
        assert_eq!(
            format_datetime(&dt, "Q", &Locale::en_us()),
            Err(FormatError::UnsupportedSpecifier("Q".to_string()))
        );
    }
}
