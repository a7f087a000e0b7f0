//! FILENAME: core/format-engine/src/number_format.rs
//! PURPOSE: Native numeric display formatting.
//! CONTEXT: Applies a native numeric format string to a number for display.
//! Two grammars are accepted, mirroring the display layer:
//! - standard specifiers: a letter with an optional 0-99 precision (`N2`, `P0`, `C`, `E3`)
//! - custom patterns built from `0 # . , %` plus literal text, up to three
//!   `;`-separated sections (positive;negative;zero)
//!
//! Any format the display layer would reject yields a `FormatError`; callers
//! decide whether to fall back to the raw value.

use crate::error::FormatError;
use crate::locale::{CurrencyPosition, Locale};

// ============================================================================
// STANDARD SPECIFIERS
// ============================================================================

/// Standard numeric format specifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardSpecifier {
    /// `N`: grouped digits, default 2 decimals
    Number,
    /// `D`: integral digits, precision = minimum digit count
    Decimal,
    /// `F`: fixed point, no grouping, default 2 decimals
    FixedPoint,
    /// `P`: value * 100 with a percent sign, default 2 decimals
    Percent,
    /// `C`: currency using the locale symbol, default 2 decimals
    Currency,
    /// `E`: scientific notation, default 6 decimals
    Exponential,
    /// `G`: shortest representation
    General,
}

impl StandardSpecifier {
    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(StandardSpecifier::Number),
            'D' => Some(StandardSpecifier::Decimal),
            'F' => Some(StandardSpecifier::FixedPoint),
            'P' => Some(StandardSpecifier::Percent),
            'C' => Some(StandardSpecifier::Currency),
            'E' => Some(StandardSpecifier::Exponential),
            'G' => Some(StandardSpecifier::General),
            _ => None,
        }
    }
}

/// A parsed native numeric format.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericFormat {
    Standard {
        specifier: StandardSpecifier,
        precision: Option<usize>,
        lowercase: bool,
    },
    Custom(CustomNumericFormat),
}

impl NumericFormat {
    pub fn parse(format: &str) -> Result<NumericFormat, FormatError> {
        if format.is_empty() {
            return Ok(NumericFormat::Standard {
                specifier: StandardSpecifier::General,
                precision: None,
                lowercase: false,
            });
        }

        let mut chars = format.chars();
        let first = chars.next().unwrap_or_default();
        let rest = chars.as_str();

        if first.is_ascii_alphabetic() && rest.chars().all(|c| c.is_ascii_digit()) {
            if rest.len() > 2 {
                return Err(FormatError::PrecisionOutOfRange(format.to_string()));
            }
            let specifier = StandardSpecifier::from_letter(first)
                .ok_or_else(|| FormatError::UnsupportedSpecifier(format.to_string()))?;
            let precision = if rest.is_empty() {
                None
            } else {
                Some(
                    rest.parse::<usize>()
                        .map_err(|_| FormatError::PrecisionOutOfRange(format.to_string()))?,
                )
            };
            return Ok(NumericFormat::Standard {
                specifier,
                precision,
                lowercase: first.is_ascii_lowercase(),
            });
        }

        Ok(NumericFormat::Custom(CustomNumericFormat::parse(format)))
    }
}

/// Format a floating point number.
pub fn format_number(value: f64, format: &str, locale: &Locale) -> Result<String, FormatError> {
    render(Operand::Float(value), format, locale)
}

/// Format an integral number. Every digit is kept; integral values are the
/// only ones `D` accepts.
pub fn format_integer(value: i64, format: &str, locale: &Locale) -> Result<String, FormatError> {
    render(Operand::Integer(i128::from(value)), format, locale)
}

// ============================================================================
// OPERANDS
// ============================================================================

/// A number being rendered. Integers stay exact unless a format divides them.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Operand {
    Float(f64),
    Integer(i128),
}

impl Operand {
    fn as_f64(self) -> f64 {
        match self {
            Operand::Float(v) => v,
            Operand::Integer(i) => i as f64,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Operand::Float(v) => v == 0.0,
            Operand::Integer(i) => i == 0,
        }
    }

    fn is_negative(self) -> bool {
        match self {
            Operand::Float(v) => v < 0.0,
            Operand::Integer(i) => i < 0,
        }
    }

    fn has_fraction(self) -> bool {
        match self {
            Operand::Float(v) => v.fract() != 0.0,
            Operand::Integer(_) => false,
        }
    }

    fn abs(self) -> Operand {
        match self {
            Operand::Float(v) => Operand::Float(v.abs()),
            Operand::Integer(i) => Operand::Integer(i.abs()),
        }
    }

    /// Negative once rounded to `places` decimals.
    fn rounds_negative(self, places: usize) -> bool {
        match self {
            Operand::Float(v) => round_half_away(v, places) < 0.0,
            Operand::Integer(i) => i < 0,
        }
    }

    /// `-1234.56` style string of the value multiplied by 100 per `percents`
    /// and divided by 1000 per `thousands`, with exactly `places` decimals.
    fn scaled_fixed(self, percents: usize, thousands: usize, places: usize) -> String {
        if let Operand::Integer(i) = self {
            if thousands == 0 {
                let scaled = (0..percents).try_fold(i, |acc, _| acc.checked_mul(100));
                if let Some(scaled) = scaled {
                    return if places == 0 {
                        scaled.to_string()
                    } else {
                        format!("{}.{}", scaled, "0".repeat(places))
                    };
                }
            }
        }

        let mut scaled = self.as_f64();
        for _ in 0..percents {
            scaled *= 100.0;
        }
        for _ in 0..thousands {
            scaled /= 1000.0;
        }
        fixed_point(scaled, places)
    }
}

fn render(value: Operand, format: &str, locale: &Locale) -> Result<String, FormatError> {
    match NumericFormat::parse(format)? {
        NumericFormat::Standard {
            specifier,
            precision,
            lowercase,
        } => {
            if specifier == StandardSpecifier::Decimal && value.has_fraction() {
                return Err(FormatError::IntegralOnly(format.to_string()));
            }
            Ok(render_standard(value, specifier, precision, lowercase, locale))
        }
        NumericFormat::Custom(custom) => Ok(custom.apply_operand(value, locale)),
    }
}

fn render_standard(
    value: Operand,
    specifier: StandardSpecifier,
    precision: Option<usize>,
    lowercase: bool,
    locale: &Locale,
) -> String {
    match specifier {
        StandardSpecifier::Number => {
            let fixed = value.scaled_fixed(0, 0, precision.unwrap_or(2));
            localize(&fixed, Some(&locale.group_separator), &locale.decimal_separator)
        }
        StandardSpecifier::FixedPoint => {
            let fixed = value.scaled_fixed(0, 0, precision.unwrap_or(2));
            localize(&fixed, None, &locale.decimal_separator)
        }
        StandardSpecifier::Decimal => {
            let fixed = value.scaled_fixed(0, 0, 0);
            let (negative, digits) = match fixed.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, fixed.as_str()),
            };
            let padded = format!("{:0>width$}", digits, width = precision.unwrap_or(0));
            if negative {
                format!("-{}", padded)
            } else {
                padded
            }
        }
        StandardSpecifier::Percent => {
            let fixed = value.scaled_fixed(1, 0, precision.unwrap_or(2));
            format!(
                "{}%",
                localize(&fixed, Some(&locale.group_separator), &locale.decimal_separator)
            )
        }
        StandardSpecifier::Currency => format_currency(value, precision.unwrap_or(2), locale),
        StandardSpecifier::Exponential => format_exponential(
            value.as_f64(),
            precision.unwrap_or(6),
            lowercase,
            &locale.decimal_separator,
        ),
        StandardSpecifier::General => match (value, precision) {
            (Operand::Integer(i), None | Some(0)) => i.to_string(),
            _ => format_general(value.as_f64(), precision, &locale.decimal_separator),
        },
    }
}

// ============================================================================
// RENDERING HELPERS
// ============================================================================

/// Round half away from zero, the rounding the display layer uses.
fn round_half_away(value: f64, places: usize) -> f64 {
    let factor = 10f64.powi(places.min(15) as i32);
    (value * factor).round() / factor
}

/// Render `value` with exactly `places` decimals using `.` and no grouping.
/// A value that rounds to zero never carries a minus sign.
fn fixed_point(value: f64, places: usize) -> String {
    let rounded = round_half_away(value, places);
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.prec$}", rounded, prec = places)
}

/// Apply locale separators to a `-1234.56` style string.
fn localize(fixed: &str, group_separator: Option<&str>, decimal_separator: &str) -> String {
    let (negative, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, fixed),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    let mut result = String::new();
    if negative {
        result.push('-');
    }
    match group_separator {
        Some(sep) => result.push_str(&group_digits(integer_part, sep)),
        None => result.push_str(integer_part),
    }
    if let Some(decimal) = decimal_part {
        result.push_str(decimal_separator);
        result.push_str(decimal);
    }
    result
}

/// Insert a separator every three digits from the right.
fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.chars().count();
    let mut result = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }
    result
}

/// Format a number as currency. Negative amounts are wrapped in parentheses.
fn format_currency(value: Operand, decimal_places: usize, locale: &Locale) -> String {
    let fixed = value.abs().scaled_fixed(0, 0, decimal_places);
    let formatted = localize(&fixed, Some(&locale.group_separator), &locale.decimal_separator);

    let with_symbol = match locale.currency_position {
        CurrencyPosition::Before => format!("{}{}", locale.currency_symbol, formatted),
        CurrencyPosition::After => format!("{}{}", formatted, locale.currency_symbol),
    };

    if value.rounds_negative(decimal_places) {
        format!("({})", with_symbol)
    } else {
        with_symbol
    }
}

/// Scientific notation with a signed, at least three digit exponent (`1.50E+003`).
fn format_exponential(value: f64, decimal_places: usize, lowercase: bool, decimal_separator: &str) -> String {
    let raw = format!("{:.prec$e}", value, prec = decimal_places);
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    format!(
        "{}{}{}{:03}",
        mantissa.replace('.', decimal_separator),
        if lowercase { 'e' } else { 'E' },
        if exponent < 0 { '-' } else { '+' },
        exponent.abs()
    )
}

/// Shortest representation; very large or small magnitudes switch to exponent form.
fn format_general(value: f64, precision: Option<usize>, decimal_separator: &str) -> String {
    let value = match precision {
        Some(p) if p > 0 => {
            let rounded = format!("{:.prec$e}", value, prec = p - 1);
            rounded.parse::<f64>().unwrap_or(value)
        }
        _ => value,
    };

    if value == 0.0 {
        return "0".to_string();
    }

    let abs_value = value.abs();
    if abs_value >= 1e15 || abs_value < 1e-5 {
        let raw = format!("{:e}", value);
        let Some((mantissa, exponent)) = raw.split_once('e') else {
            return raw;
        };
        let exponent: i32 = exponent.parse().unwrap_or(0);
        return format!(
            "{}E{}{:02}",
            mantissa.replace('.', decimal_separator),
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        );
    }

    format!("{}", value).replace('.', decimal_separator)
}

// ============================================================================
// CUSTOM PATTERNS
// ============================================================================

/// A parsed token from a custom pattern section.
#[derive(Debug, Clone, PartialEq)]
enum PatternToken {
    /// `0`: digit, zero padded
    Zero,
    /// `#`: digit only if significant
    Hash,
    /// `.`: first occurrence is the decimal point
    DecimalPoint,
    /// `,`: grouping between digits, scaling by 1000 when trailing
    Group,
    /// `%`: multiplies by 100 and renders a percent sign
    Percent,
    /// Quoted, escaped or passthrough text
    Literal(String),
}

impl PatternToken {
    fn is_digit(&self) -> bool {
        matches!(self, PatternToken::Zero | PatternToken::Hash)
    }
}

/// A custom numeric pattern with 1-3 sections.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomNumericFormat {
    sections: Vec<Vec<PatternToken>>,
}

impl CustomNumericFormat {
    pub fn parse(pattern: &str) -> CustomNumericFormat {
        CustomNumericFormat {
            sections: split_sections(pattern).iter().map(|s| tokenize(s)).collect(),
        }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn apply(&self, value: f64, locale: &Locale) -> String {
        self.apply_operand(Operand::Float(value), locale)
    }

    fn apply_operand(&self, value: Operand, locale: &Locale) -> String {
        let first = self.sections.first().map(Vec::as_slice).unwrap_or_default();
        let negative = self.sections.get(1).filter(|s| !s.is_empty());
        let zero = self.sections.get(2).filter(|s| !s.is_empty());

        if value.is_zero() {
            if let Some(section) = zero {
                return render_section(Operand::Integer(0), section, locale);
            }
        }
        if value.is_negative() {
            if let Some(section) = negative {
                return render_section(value.abs(), section, locale);
            }
        }
        render_section(value, first, locale)
    }
}

/// Split on `;` outside quotes and escapes.
fn split_sections(pattern: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in pattern.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', None) => {
                current.push(c);
                escaped = true;
            }
            ('"' | '\'', None) => {
                quote = Some(c);
                current.push(c);
            }
            (q, Some(open)) if q == open => {
                quote = None;
                current.push(c);
            }
            (';', None) => sections.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    sections.push(current);
    sections.truncate(3);
    sections
}

fn tokenize(section: &str) -> Vec<PatternToken> {
    let mut tokens = Vec::new();
    let mut chars = section.chars();
    let mut seen_decimal = false;

    fn push_literal(tokens: &mut Vec<PatternToken>, text: &str) {
        if let Some(PatternToken::Literal(prev)) = tokens.last_mut() {
            prev.push_str(text);
        } else {
            tokens.push(PatternToken::Literal(text.to_string()));
        }
    }

    while let Some(c) = chars.next() {
        match c {
            '0' => tokens.push(PatternToken::Zero),
            '#' => tokens.push(PatternToken::Hash),
            '.' if !seen_decimal => {
                seen_decimal = true;
                tokens.push(PatternToken::DecimalPoint);
            }
            '.' => {}
            ',' => tokens.push(PatternToken::Group),
            '%' => tokens.push(PatternToken::Percent),
            '\\' => {
                if let Some(next) = chars.next() {
                    push_literal(&mut tokens, &next.to_string());
                }
            }
            '"' | '\'' => {
                let quoted: String = chars.by_ref().take_while(|&q| q != c).collect();
                push_literal(&mut tokens, &quoted);
            }
            other => push_literal(&mut tokens, &other.to_string()),
        }
    }
    tokens
}

fn render_section(value: Operand, tokens: &[PatternToken], locale: &Locale) -> String {
    let Some(first_digit) = tokens.iter().position(PatternToken::is_digit) else {
        // Literal-only section
        return tokens
            .iter()
            .map(|t| match t {
                PatternToken::Literal(s) => s.as_str(),
                PatternToken::Percent => "%",
                _ => "",
            })
            .collect();
    };
    let last_digit = tokens.iter().rposition(PatternToken::is_digit).unwrap_or(first_digit);

    let decimal_at = tokens
        .iter()
        .position(|t| *t == PatternToken::DecimalPoint)
        .unwrap_or(tokens.len());
    let integer_tokens = &tokens[..decimal_at.min(tokens.len())];
    let fraction_tokens = if decimal_at < tokens.len() { &tokens[decimal_at + 1..] } else { &[][..] };

    let min_integer = integer_tokens.iter().filter(|t| **t == PatternToken::Zero).count();
    let min_fraction = fraction_tokens.iter().filter(|t| **t == PatternToken::Zero).count();
    let max_fraction = fraction_tokens.iter().filter(|t| t.is_digit()).count();

    // Commas directly after the last integer digit scale by 1000 each.
    let last_integer_digit = integer_tokens.iter().rposition(PatternToken::is_digit);
    let scale_commas = match last_integer_digit {
        Some(pos) => integer_tokens[pos + 1..]
            .iter()
            .take_while(|t| **t == PatternToken::Group)
            .count(),
        None => 0,
    };
    let grouping = match last_integer_digit {
        Some(pos) => integer_tokens[..pos].iter().any(|t| *t == PatternToken::Group),
        None => false,
    };
    let percent_count = tokens.iter().filter(|t| **t == PatternToken::Percent).count();

    let fixed = value.scaled_fixed(percent_count, scale_commas, max_fraction);
    let (negative, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, fixed.as_str()),
    };
    let (integer_digits, fraction_digits) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut fraction = fraction_digits.to_string();
    while fraction.len() > min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }

    let mut integer = integer_digits.trim_start_matches('0').to_string();
    while integer.len() < min_integer {
        integer.insert(0, '0');
    }
    if grouping {
        integer = group_digits(&integer, &locale.group_separator);
    }

    let affix = |slice: &[PatternToken]| -> String {
        slice
            .iter()
            .filter_map(|t| match t {
                PatternToken::Literal(s) => Some(s.as_str()),
                PatternToken::Percent => Some("%"),
                _ => None,
            })
            .collect()
    };

    let mut result = affix(&tokens[..first_digit]);
    if negative {
        result.push('-');
    }
    result.push_str(&integer);
    if !fraction.is_empty() {
        result.push_str(&locale.decimal_separator);
        result.push_str(&fraction);
    }
    // Interior literals are emitted after the number.
    result.push_str(&affix(&tokens[first_digit..=last_digit]));
    result.push_str(&affix(&tokens[last_digit + 1..]));
    result
}
