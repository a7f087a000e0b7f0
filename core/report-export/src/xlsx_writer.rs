//! FILENAME: core/report-export/src/xlsx_writer.rs

use crate::{ExportColumn, ExportError, ReportSheet};
use chrono::{NaiveDate, NaiveDateTime};
use element_engine::{Classification, RawValue};
use format_engine::logging::{self, log_debug, log_info};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Format for date values in columns that are not classified DateTime.
const FALLBACK_DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

const MIN_COLUMN_WIDTH: f64 = 8.0;
const MAX_COLUMN_WIDTH: f64 = 60.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub fn save_report_xlsx(sheets: &[ReportSheet], path: &Path) -> Result<(), ExportError> {
    let mut xlsx = build_workbook(sheets)?;
    xlsx.save(path)?;
    log_info!(logging::EXPORT, "saved {} sheet(s) to {}", sheets.len(), path.display());
    Ok(())
}

pub fn save_report_xlsx_to_buffer(sheets: &[ReportSheet]) -> Result<Vec<u8>, ExportError> {
    let mut xlsx = build_workbook(sheets)?;
    Ok(xlsx.save_to_buffer()?)
}

/// Days since 1899-12-30, the spreadsheet date epoch.
pub fn excel_serial(value: &NaiveDateTime) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = value.signed_duration_since(epoch).num_milliseconds();
    Some(millis as f64 / MILLIS_PER_DAY)
}

fn build_workbook(sheets: &[ReportSheet]) -> Result<XlsxWorkbook, ExportError> {
    let mut xlsx = XlsxWorkbook::new();
    for sheet in sheets {
        let worksheet = xlsx.add_worksheet();
        write_sheet(worksheet, sheet)?;
    }
    Ok(xlsx)
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &ReportSheet) -> Result<(), ExportError> {
    if sheet.columns.is_empty() {
        return Err(ExportError::NoColumns(sheet.name.clone()));
    }
    worksheet.set_name(&sheet.name)?;

    let header_format = Format::new().set_bold();
    let column_formats: Vec<Option<Format>> = sheet.columns.iter().map(column_format).collect();
    let date_fallback = Format::new().set_num_format(FALLBACK_DATE_FORMAT);

    // Header row
    for (col, column) in sheet.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, &column.header, &header_format)?;
    }

    // Data rows
    for (index, row) in sheet.rows.iter().enumerate() {
        if row.len() != sheet.columns.len() {
            return Err(ExportError::RowWidth {
                row: index,
                expected: sheet.columns.len(),
                actual: row.len(),
            });
        }
        let xlsx_row = index as u32 + 1;

        for (col, value) in row.iter().enumerate() {
            let col_num = col as u16;
            let format = column_formats[col].as_ref();

            match value {
                RawValue::Empty => {}
                RawValue::Number(_) | RawValue::Integer(_) => {
                    let n = value.as_f64().unwrap_or_default();
                    if let Some(fmt) = format {
                        worksheet.write_number_with_format(xlsx_row, col_num, n, fmt)?;
                    } else {
                        worksheet.write_number(xlsx_row, col_num, n)?;
                    }
                }
                RawValue::Text(s) => {
                    worksheet.write_string(xlsx_row, col_num, s)?;
                }
                RawValue::Boolean(b) => {
                    worksheet.write_boolean(xlsx_row, col_num, *b)?;
                }
                RawValue::DateTime(dt) => match excel_serial(dt) {
                    Some(serial) => {
                        let fmt = match sheet.columns[col].classification {
                            Classification::DateTime => format.unwrap_or(&date_fallback),
                            _ => &date_fallback,
                        };
                        worksheet.write_number_with_format(xlsx_row, col_num, serial, fmt)?;
                    }
                    None => {
                        log_debug!(logging::EXPORT, "date {} out of range, written as text", dt);
                        worksheet.write_string(xlsx_row, col_num, value.to_string())?;
                    }
                },
            }
        }
    }

    // Column widths from header and text lengths (character units)
    for (col, column) in sheet.columns.iter().enumerate() {
        let longest_text = sheet
            .rows
            .iter()
            .filter_map(|row| match &row[col] {
                RawValue::Text(s) => Some(s.chars().count()),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        let width = (column.header.chars().count().max(longest_text) as f64 + 2.0)
            .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        worksheet.set_column_width(col as u16, width)?;
    }

    Ok(())
}

fn column_format(column: &ExportColumn) -> Option<Format> {
    if column.spreadsheet_format.is_empty() {
        None
    } else {
        Some(Format::new().set_num_format(&column.spreadsheet_format))
    }
}
