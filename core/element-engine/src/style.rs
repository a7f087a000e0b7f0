//! FILENAME: core/element-engine/src/style.rs
//! PURPOSE: Custom cell style specification of an element.
//! CONTEXT: Up to three CSS strings separated by '|': the default style, the
//! style for empty or zero values, and the style for negative values.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use format_engine::RawValue;

const DEFAULT: usize = 0;
const ZERO: usize = 1;
const NEGATIVE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellCss {
    styles: SmallVec<[String; 3]>,
}

impl CellCss {
    /// Parse a `default|zero|negative` spec. Parts beyond the third are ignored.
    pub fn parse(spec: &str) -> Self {
        if spec.trim().is_empty() {
            return CellCss::default();
        }
        CellCss {
            styles: spec.split('|').take(3).map(|s| s.trim().to_string()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.styles.iter().all(String::is_empty)
    }

    fn part(&self, index: usize) -> &str {
        self.styles.get(index).map(String::as_str).unwrap_or_default()
    }

    pub fn default_style(&self) -> &str {
        self.part(DEFAULT)
    }

    pub fn zero_style(&self) -> &str {
        self.part(ZERO)
    }

    pub fn negative_style(&self) -> &str {
        self.part(NEGATIVE)
    }

    /// Style for a value. Specific styles fall back to the default style when empty.
    pub fn css_for(&self, value: &RawValue) -> &str {
        let specific = match value {
            RawValue::Empty => self.zero_style(),
            RawValue::Text(s) if s.is_empty() => self.zero_style(),
            _ => match value.as_f64() {
                Some(n) if n == 0.0 => self.zero_style(),
                Some(n) if n < 0.0 => self.negative_style(),
                _ => "",
            },
        };
        if specific.is_empty() {
            self.default_style()
        } else {
            specific
        }
    }
}
