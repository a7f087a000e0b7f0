//! FILENAME: core/report-export/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Sheet '{0}' has no columns")]
    NoColumns(String),

    #[error("Row {row} has {actual} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
