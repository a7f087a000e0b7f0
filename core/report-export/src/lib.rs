//! FILENAME: core/report-export/src/lib.rs
//! Report Export Module
//!
//! Writes report results to XLSX, using each element's spreadsheet format.

mod error;
mod xlsx_writer;

pub use error::ExportError;
pub use xlsx_writer::{excel_serial, save_report_xlsx, save_report_xlsx_to_buffer};

use element_engine::{Classification, Locale, RawValue, ReportElement, Translator};
use serde::{Deserialize, Serialize};

// ============================================================================
// COLUMN
// ============================================================================

/// Header and spreadsheet format of one exported column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportColumn {
    pub header: String,
    pub classification: Classification,
    /// Spreadsheet-dialect format; empty for General.
    pub spreadsheet_format: String,
}

impl ExportColumn {
    pub fn new(
        header: impl Into<String>,
        classification: Classification,
        spreadsheet_format: impl Into<String>,
    ) -> Self {
        Self {
            header: header.into(),
            classification,
            spreadsheet_format: spreadsheet_format.into(),
        }
    }

    /// Column for an element: translated display name and spreadsheet format.
    /// Text and enumerated columns are exported without a number format.
    pub fn from_element(element: &ReportElement, locale: &Locale, translator: &dyn Translator) -> Self {
        let classification = element.format_classification();
        let spreadsheet_format = match classification {
            Classification::Numeric | Classification::DateTime => {
                element.spreadsheet_format(locale)
            }
            Classification::Text | Classification::Enum => String::new(),
        };
        Self {
            header: element.display_name_translated(translator),
            classification,
            spreadsheet_format,
        }
    }
}

// ============================================================================
// SHEET
// ============================================================================

/// A named result table to export.
#[derive(Debug, Clone)]
pub struct ReportSheet {
    pub name: String,
    pub columns: Vec<ExportColumn>,
    pub rows: Vec<Vec<RawValue>>,
}

impl ReportSheet {
    pub fn new(name: impl Into<String>, columns: Vec<ExportColumn>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn from_elements(
        name: impl Into<String>,
        elements: &[ReportElement],
        locale: &Locale,
        translator: &dyn Translator,
    ) -> Self {
        let columns = elements
            .iter()
            .map(|e| ExportColumn::from_element(e, locale, translator))
            .collect();
        Self::new(name, columns)
    }

    /// Append a row; it must have one value per column.
    pub fn push_row(&mut self, row: Vec<RawValue>) -> Result<(), ExportError> {
        if row.len() != self.columns.len() {
            return Err(ExportError::RowWidth {
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }
}
