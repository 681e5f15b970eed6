//! Record normalization
//!
//! Turns the raw input worksheet into a sequence of [`Record`]s keyed by the
//! canonical field names. Column headers are matched through
//! [`fields::canonicalize`]; unmatched columns are dropped, missing canonical
//! fields are filled with empty text so downstream code never has to probe
//! for presence.

use crate::error::{ReportError, Result};
use crate::fields;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::collections::HashMap;
use std::path::Path;

/// One normalized input row. Contains every canonical field name as a key,
/// read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Record {
    values: HashMap<&'static str, String>,
}

impl Record {
    /// Value for a canonical field. Unknown names read as empty text.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    fn set(&mut self, field: &'static str, value: String) {
        self.values.insert(field, value);
    }

    fn fill_missing(&mut self) {
        for field in fields::TEMPLATE_FIELDS {
            self.values.entry(field).or_default();
        }
    }

    /// Number of fields carried by the record (always the full canonical set
    /// after normalization).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Read the first worksheet of the input workbook.
pub fn read_input(path: &Path) -> Result<Range<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReportError::EmptyInput(format!("{} has no worksheets", path.display())))??;
    Ok(range)
}

/// Normalize a worksheet range into records.
///
/// The first row is the header row. Fails with [`ReportError::EmptyInput`]
/// when no data rows follow it.
pub fn normalize(range: &Range<Data>) -> Result<Vec<Record>> {
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ReportError::EmptyInput("worksheet is empty".to_string()))?;

    // Column index -> canonical field, None for columns we drop.
    let columns: Vec<Option<&'static str>> = header
        .iter()
        .map(|cell| fields::canonicalize(&coerce_text(cell)))
        .collect();

    let mut records = Vec::new();
    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let mut record = Record::default();
        for (idx, cell) in row.iter().enumerate() {
            if let Some(field) = columns.get(idx).copied().flatten() {
                record.set(field, coerce_text(cell));
            }
        }
        record.fill_missing();
        records.push(record);
    }

    if records.is_empty() {
        return Err(ReportError::EmptyInput(
            "worksheet has a header row but no data rows".to_string(),
        ));
    }
    Ok(records)
}

/// Best-effort text coercion for a cell value.
///
/// Whole numbers render without a decimal point ("113", not "113.0") so that
/// identifiers stored as numeric cells round-trip cleanly into sheet titles
/// and filenames.
pub fn coerce_text(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.is_finite() && f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => {
            if *b {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) if naive.time() == chrono::NaiveTime::MIN => {
                naive.format("%Y-%m-%d").to_string()
            }
            Some(naive) => naive.format("%Y-%m-%d %H:%M").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}
