//! End-to-end pipeline tests
//!
//! Build a template, synthesize an input workbook and photo folder, run the
//! generator and inspect the produced workbook.

use inspection_report::{report, template};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Write an input workbook: one header row, then one row per record.
fn write_input(path: &Path, headers: &[&str], rows: &[Vec<&str>]) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
    for (c, header) in headers.iter().enumerate() {
        sheet.get_cell_mut((c as u32 + 1, 1)).set_value(*header);
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet
                .get_cell_mut((c as u32 + 1, r as u32 + 2))
                .set_value(*value);
        }
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

fn write_template_file(dir: &Path) -> PathBuf {
    let path = dir.join("inspection_template.xlsx");
    template::write_template(&path).unwrap();
    path
}

fn write_photo(dir: &Path, name: &str, width: u32, height: u32) {
    image::RgbImage::new(width, height).save(dir.join(name)).unwrap();
}

#[test]
fn test_end_to_end_generation_with_photo() {
    let dir = tempdir().unwrap();
    let template_path = write_template_file(dir.path());

    let photo_dir = dir.path().join("photos");
    std::fs::create_dir(&photo_dir).unwrap();
    write_photo(&photo_dir, "AA_113_2933.jpg", 600, 400);

    let input = dir.path().join("inspection_data.xlsx");
    write_input(
        &input,
        &["BIN", "Member", "Condition", "CS1", "Photo Filename", "Photo Path"],
        &[vec!["113", "Pier 4", "Fair", "X", "AA_113_2933", "photos"]],
    );

    let output = dir.path().join("inspection_reports.xlsx");
    let summary = report::generate_report(&input, &template_path, &output).unwrap();

    assert_eq!(summary.output_path, output);
    assert!(output.is_file());
    assert_eq!(summary.pages.len(), 1);
    assert_eq!(summary.pages[0].title, "113_1");
    assert_eq!(summary.pages[0].photos_placed, 1);
    assert_eq!(summary.pages[0].photos_skipped, 0);

    let book = umya_spreadsheet::reader::xlsx::read(&output).unwrap();
    let page = book.get_sheet_by_name("113_1").expect("report page missing");
    assert_eq!(page.get_value("C4"), "113"); // BIN
    assert_eq!(page.get_value("C13"), "Pier 4"); // Condition Location
    assert_eq!(page.get_value("C16"), "Fair"); // Condition State:
    assert_eq!(page.get_value("I14"), "X"); // CS1

    // Template scaffolding is stripped from the output.
    assert!(book.get_sheet_by_name(template::TEMPLATE_SHEET).is_none());
    assert!(book.get_sheet_by_name(template::ANCHOR_SHEET).is_none());
}

#[test]
fn test_numeric_bin_renders_without_decimal_point() {
    let dir = tempdir().unwrap();
    let template_path = write_template_file(dir.path());

    let input = dir.path().join("input.xlsx");
    {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sheet.get_cell_mut("A1").set_value("BIN");
        sheet.get_cell_mut("A2").set_value_number(113.0);
        umya_spreadsheet::writer::xlsx::write(&book, &input).unwrap();
    }

    let output = dir.path().join("out.xlsx");
    let summary = report::generate_report(&input, &template_path, &output).unwrap();
    assert_eq!(summary.pages[0].title, "113_1");

    let book = umya_spreadsheet::reader::xlsx::read(&output).unwrap();
    assert_eq!(
        book.get_sheet_by_name("113_1").unwrap().get_value("C4"),
        "113"
    );
}

#[test]
fn test_sheet_title_sanitization() {
    let dir = tempdir().unwrap();
    let template_path = write_template_file(dir.path());

    let input = dir.path().join("input.xlsx");
    write_input(&input, &["BIN"], &[vec!["A/B:C*D"]]);

    let output = dir.path().join("out.xlsx");
    let summary = report::generate_report(&input, &template_path, &output).unwrap();
    assert_eq!(summary.pages[0].title, "A_B_C_D_1");

    let book = umya_spreadsheet::reader::xlsx::read(&output).unwrap();
    assert!(book.get_sheet_by_name("A_B_C_D_1").is_some());
}

#[test]
fn test_missing_photo_still_produces_page() {
    let dir = tempdir().unwrap();
    let template_path = write_template_file(dir.path());

    let input = dir.path().join("input.xlsx");
    write_input(
        &input,
        &["BIN", "Photo Filename", "Photo Path"],
        &[vec!["42", "no_such_photo", "photos"]],
    );

    let output = dir.path().join("out.xlsx");
    let summary = report::generate_report(&input, &template_path, &output).unwrap();
    assert_eq!(summary.pages.len(), 1);
    assert_eq!(summary.pages[0].photos_placed, 0);
    assert!(output.is_file());
}

#[test]
fn test_one_page_per_record() {
    let dir = tempdir().unwrap();
    let template_path = write_template_file(dir.path());

    let input = dir.path().join("input.xlsx");
    write_input(
        &input,
        &["BIN", "Member"],
        &[
            vec!["113", "Pier 1"],
            vec!["113", "Pier 2"],
            vec!["207", "Abutment A"],
        ],
    );

    let output = dir.path().join("out.xlsx");
    let summary = report::generate_report(&input, &template_path, &output).unwrap();
    assert_eq!(summary.pages.len(), 3);

    let book = umya_spreadsheet::reader::xlsx::read(&output).unwrap();
    assert!(book.get_sheet_by_name("113_1").is_some());
    assert!(book.get_sheet_by_name("113_2").is_some());
    assert!(book.get_sheet_by_name("207_3").is_some());
    assert_eq!(
        book.get_sheet_by_name("207_3").unwrap().get_value("C13"),
        "Abutment A"
    );
}

#[test]
fn test_blocked_output_falls_back_to_timestamped_name() {
    let dir = tempdir().unwrap();
    let template_path = write_template_file(dir.path());

    let input = dir.path().join("input.xlsx");
    write_input(&input, &["BIN"], &[vec!["113"]]);

    // A directory at the output path makes the first save fail the same way
    // a locked file does.
    let output = dir.path().join("blocked.xlsx");
    std::fs::create_dir(&output).unwrap();

    let summary = report::generate_report(&input, &template_path, &output).unwrap();
    assert_ne!(summary.output_path, output);
    assert!(summary.output_path.is_file());
    let name = summary
        .output_path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();
    assert!(name.starts_with("blocked_"));
    assert!(name.ends_with(".xlsx"));
}
