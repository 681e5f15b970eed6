//! Report generation
//!
//! Orchestrates the batch: read and normalize the input table, load the
//! template, clone one page per record, strip the template sheets and save.
//! Only two conditions are fatal: an input with no data rows, and a save
//! that fails even under the timestamped fallback name. Everything else is
//! isolated to its record or photo slot.

mod page;

pub use page::{fitted_size, safe_title, PageStats, PhotoPlacement};

use crate::error::{ReportError, Result};
use crate::normalizer;
use crate::template;
use chrono::Utc;
use std::path::{Path, PathBuf};
use umya_spreadsheet::structs::Spreadsheet;

/// Result of a completed run.
#[derive(Debug)]
pub struct ReportSummary {
    /// Path actually written, which differs from the requested path when the
    /// save had to fall back to a timestamped name.
    pub output_path: PathBuf,
    pub pages: Vec<PageStats>,
}

/// Run the whole pipeline: input workbook -> one report page per record.
pub fn generate_report(input: &Path, template_path: &Path, output: &Path) -> Result<ReportSummary> {
    if !input.exists() {
        return Err(ReportError::FileNotFound(input.display().to_string()));
    }
    if !template_path.exists() {
        return Err(ReportError::FileNotFound(template_path.display().to_string()));
    }

    println!("- Reading {}...", input.display());
    let range = normalizer::read_input(input)?;
    let records = normalizer::normalize(&range)?;
    println!("✔ {} record(s)", records.len());

    println!("- Loading template {}...", template_path.display());
    let mut book = umya_spreadsheet::reader::xlsx::read(template_path)
        .map_err(|e| ReportError::Spreadsheet(e.to_string()))?;
    let anchors = template::read_anchors(&book)?;
    let template_sheet = book
        .get_sheet_by_name(template::TEMPLATE_SHEET)
        .cloned()
        .ok_or_else(|| {
            ReportError::TemplateLayout(format!(
                "template is missing the {} sheet",
                template::TEMPLATE_SHEET
            ))
        })?;
    println!("✔ {} anchor(s)", anchors.len());

    // Photo folders given as relative paths resolve against the directory
    // holding the input workbook.
    let base_dir = input
        .canonicalize()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    println!("- Generating pages...");
    let mut pages = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        pages.push(page::render_page(
            &mut book,
            &template_sheet,
            &anchors,
            record,
            i + 1,
            &base_dir,
        )?);
    }
    println!("✔ {} page(s)", pages.len());

    for name in [template::TEMPLATE_SHEET, template::ANCHOR_SHEET] {
        let _ = book.remove_sheet_by_name(name);
    }

    println!("- Saving workbook...");
    let output_path = save_with_fallback(&book, output)?;
    Ok(ReportSummary { output_path, pages })
}

/// Save the workbook, retrying once under `<stem>_<unix-seconds>.<ext>` when
/// the destination cannot be written (typically locked by an open Excel).
fn save_with_fallback(book: &Spreadsheet, output: &Path) -> Result<PathBuf> {
    match umya_spreadsheet::writer::xlsx::write(book, output) {
        Ok(()) => Ok(output.to_path_buf()),
        Err(first) => {
            let stem = output
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("inspection_reports");
            let ext = output
                .extension()
                .and_then(|s| s.to_str())
                .unwrap_or("xlsx");
            let fallback =
                output.with_file_name(format!("{}_{}.{}", stem, Utc::now().timestamp(), ext));
            umya_spreadsheet::writer::xlsx::write(book, &fallback).map_err(|second| {
                ReportError::OutputWrite(format!(
                    "{} (fallback {} also failed: {})",
                    first,
                    fallback.display(),
                    second
                ))
            })?;
            Ok(fallback)
        }
    }
}
