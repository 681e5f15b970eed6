//! Report template workbook
//!
//! The template workbook carries two sheets: `TEMPLATE`, the formatted page
//! layout that gets cloned once per record, and `_anchors`, a metadata sheet
//! listing which cell each field value is written into. [`build_template`]
//! constructs a fresh template; [`read_anchors`] loads the anchor table from
//! any workbook following that convention, so a hand-edited template keeps
//! working as long as its `_anchors` sheet is maintained.

use crate::error::{ReportError, Result};
use std::collections::HashMap;
use std::path::Path;
use umya_spreadsheet::structs::{
    Border, HorizontalAlignmentValues, Spreadsheet, VerticalAlignmentValues, Worksheet,
};

/// Name of the reusable page layout sheet.
pub const TEMPLATE_SHEET: &str = "TEMPLATE";
/// Name of the field -> cell metadata sheet.
pub const ANCHOR_SHEET: &str = "_anchors";

/// Cell anchors of the two photo slots on a page, in placement order.
pub const PHOTO_SLOTS: [&str; 2] = ["E27", "M27"];

/// Photo bounding box: 3.0 x 3.5 inches at 96 dpi.
pub const PHOTO_DPI: u32 = 96;
pub const PHOTO_BOX_W_IN: f64 = 3.0;
pub const PHOTO_BOX_H_IN: f64 = 3.5;
pub const PHOTO_BOX_W_PX: u32 = (PHOTO_BOX_W_IN * PHOTO_DPI as f64) as u32; // 288
pub const PHOTO_BOX_H_PX: u32 = (PHOTO_BOX_H_IN * PHOTO_DPI as f64) as u32; // 336

/// Field name -> cell address pairs written into the `_anchors` sheet.
/// "Photo Path" is deliberately absent: it steers photo resolution and is
/// never written onto the page.
pub const ANCHORS: [(&str, &str); 23] = [
    ("BIN", "C4"),
    ("Inspection Date", "M4"),
    ("Weather", "M6"),
    ("Team Leader", "C6"),
    ("Asst Team Leader", "M7"),
    ("Span", "C7"),
    ("Location", "E7"),
    ("Notes", "B10"),
    ("Condition Location", "C13"),
    ("Condition Note", "C15"),
    ("Condition State:", "C16"),
    ("References Photo(s):", "C17"),
    ("References Sketch(es)", "C18"),
    ("CS0", "H14"),
    ("CS1", "I14"),
    ("CS2", "J14"),
    ("CS3", "K14"),
    ("CS4", "L14"),
    ("CS5", "M14"),
    ("Description", "B20"),
    ("Attachment Description", "B26"),
    ("Photo Number", "H25"),
    ("Photo Filename", "K25"),
];

const TITLE_TEXT: &str = "BRIDGE IN-DEPTH INSPECTION REPORT";
const COLUMNS: [&str; 13] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M",
];

/// Field name -> cell address, loaded once per run and immutable afterward.
pub type AnchorTable = HashMap<String, String>;

/// Parse the anchor table from a template workbook.
pub fn read_anchors(book: &Spreadsheet) -> Result<AnchorTable> {
    let sheet = book.get_sheet_by_name(ANCHOR_SHEET).ok_or_else(|| {
        ReportError::TemplateLayout(format!(
            "template is missing the {} metadata sheet",
            ANCHOR_SHEET
        ))
    })?;

    let mut anchors = AnchorTable::new();
    // Row 1 is the header ("field" / "cell").
    for row in 2..=sheet.get_highest_row() {
        let field = sheet.get_value((1, row));
        let cell = sheet.get_value((2, row));
        if field.is_empty() || cell.is_empty() {
            continue;
        }
        anchors.insert(field, cell);
    }

    if anchors.is_empty() {
        return Err(ReportError::TemplateLayout(format!(
            "{} sheet has no field/cell rows",
            ANCHOR_SHEET
        )));
    }
    Ok(anchors)
}

/// Build a fresh template workbook: the `TEMPLATE` page layout plus the
/// `_anchors` metadata sheet.
pub fn build_template() -> Result<Spreadsheet> {
    let mut book = umya_spreadsheet::new_file();

    {
        let sheet = book
            .get_sheet_by_name_mut("Sheet1")
            .ok_or_else(|| ReportError::Spreadsheet("new workbook has no active sheet".to_string()))?;
        sheet.set_name(TEMPLATE_SHEET);
        build_page_layout(sheet);
    }

    let meta = book
        .new_sheet(ANCHOR_SHEET)
        .map_err(|e| ReportError::Spreadsheet(e.to_string()))?;
    meta.get_cell_mut("A1").set_value("field");
    meta.get_cell_mut("B1").set_value("cell");
    for (i, (field, cell)) in ANCHORS.iter().enumerate() {
        let row = (i + 2) as u32;
        meta.get_cell_mut((1, row)).set_value(*field);
        meta.get_cell_mut((2, row)).set_value(*cell);
    }

    Ok(book)
}

/// Build a template workbook and write it to `path`.
pub fn write_template(path: &Path) -> Result<()> {
    let book = build_template()?;
    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| ReportError::OutputWrite(e.to_string()))?;
    Ok(())
}

fn build_page_layout(sheet: &mut Worksheet) {
    for (i, col) in COLUMNS.iter().enumerate() {
        let width = if i == 0 { 6.0 } else { 14.0 };
        sheet.get_column_dimension_mut(col).set_width(width);
    }

    // Title banner, no border.
    sheet.add_merge_cells("B2:L2");
    sheet.get_cell_mut("B2").set_value(TITLE_TEXT);
    {
        let style = sheet.get_style_mut("B2");
        style.get_font_mut().set_bold(true).set_size(16.0);
        let alignment = style.get_alignment_mut();
        alignment.set_horizontal(HorizontalAlignmentValues::Center);
        alignment.set_vertical(VerticalAlignmentValues::Center);
    }

    // Header block: BIN / date / crew / span / location / weather.
    outline(sheet, 4, 2, 7, 13, Border::BORDER_MEDIUM);
    label(sheet, "B4", "BIN:");
    label(sheet, "L4", "Inspection Date:");
    label(sheet, "B6", "Team Leader:");
    label(sheet, "L6", "Weather:");
    label(sheet, "B7", "Span:");
    label(sheet, "D7", "Location:");
    label(sheet, "L7", "Asst. Team Leader:");
    for addr in ["C4", "C6", "C7", "M4", "M6", "M7", "E7"] {
        underline(sheet, addr);
    }

    // Notes area, no border.
    label(sheet, "B9", "Notes:");
    sheet.add_merge_cells("B10:L11");

    // Condition block with CS0-CS5 mark row.
    outline(sheet, 13, 2, 18, 13, Border::BORDER_MEDIUM);
    label(sheet, "B13", "Location:");
    label(sheet, "B15", "Note:");
    label(sheet, "B16", "Condition State:");
    label(sheet, "B17", "References Photo(s):");
    label(sheet, "B18", "References Sketch(es)");
    for range in ["C13:G13", "C16:G16", "C17:G17", "C18:G18"] {
        sheet.add_merge_cells(range);
    }
    for (i, cs) in ["CS0", "CS1", "CS2", "CS3", "CS4", "CS5"].iter().enumerate() {
        let col = 8 + i as u32; // columns H..M
        sheet.get_cell_mut((col, 13)).set_value(*cs);
        {
            let style = sheet.get_style_mut((col, 13));
            style.get_font_mut().set_bold(true);
            style
                .get_alignment_mut()
                .set_horizontal(HorizontalAlignmentValues::Center);
        }
        outline(sheet, 13, col, 13, col, Border::BORDER_MEDIUM);
        sheet
            .get_style_mut((col, 14))
            .get_alignment_mut()
            .set_horizontal(HorizontalAlignmentValues::Center);
        outline(sheet, 14, col, 14, col, Border::BORDER_MEDIUM);
    }

    // Description area.
    label(sheet, "B19", "Description:");
    sheet.add_merge_cells("B20:M22");

    // Photographs band.
    sheet.add_merge_cells("B23:M23");
    sheet.get_cell_mut("B23").set_value("Inspection Photographs");
    {
        let style = sheet.get_style_mut("B23");
        style.get_font_mut().set_bold(true);
        style
            .get_alignment_mut()
            .set_horizontal(HorizontalAlignmentValues::Center);
    }
    outline(sheet, 23, 2, 23, 13, Border::BORDER_MEDIUM);
    sheet.get_row_dimension_mut(&23).set_height(22.0);

    // Attachment description box on the left.
    sheet.add_merge_cells("B26:D38");
    label(sheet, "B26", "Attachment Description:");
    outline(sheet, 25, 2, 38, 4, Border::BORDER_MEDIUM);

    // Photo metadata row.
    label(sheet, "G25", "Photo Number:");
    label(sheet, "J25", "Photo Filename:");
    sheet.add_merge_cells("H25:I25");
    sheet.add_merge_cells("K25:L25");
    outline(sheet, 25, 2, 26, 13, Border::BORDER_MEDIUM);

    // Photo rectangle holding the two image slots (E27, M27).
    outline(sheet, 27, 5, 38, 13, Border::BORDER_MEDIUM);
}

/// Bold label with left/center alignment.
fn label(sheet: &mut Worksheet, addr: &str, text: &str) {
    sheet.get_cell_mut(addr).set_value(text);
    let style = sheet.get_style_mut(addr);
    style.get_font_mut().set_bold(true);
    let alignment = style.get_alignment_mut();
    alignment.set_horizontal(HorizontalAlignmentValues::Left);
    alignment.set_vertical(VerticalAlignmentValues::Center);
    alignment.set_wrap_text(true);
}

/// Thin bottom border marking a write-in cell.
fn underline(sheet: &mut Worksheet, addr: &str) {
    sheet
        .get_style_mut(addr)
        .get_borders_mut()
        .get_bottom_border_mut()
        .set_border_style(Border::BORDER_THIN);
    let alignment = sheet.get_style_mut(addr).get_alignment_mut();
    alignment.set_horizontal(HorizontalAlignmentValues::Left);
    alignment.set_vertical(VerticalAlignmentValues::Center);
}

/// Draw only the outer rectangle border around rows `r1..=r2`, columns
/// `c1..=c2` (1-based), leaving inner cell borders untouched.
fn outline(sheet: &mut Worksheet, r1: u32, c1: u32, r2: u32, c2: u32, style: &str) {
    for row in r1..=r2 {
        for col in c1..=c2 {
            let borders = sheet.get_style_mut((col, row)).get_borders_mut();
            if col == c1 {
                borders.get_left_border_mut().set_border_style(style);
            }
            if col == c2 {
                borders.get_right_border_mut().set_border_style(style);
            }
            if row == r1 {
                borders.get_top_border_mut().set_border_style(style);
            }
            if row == r2 {
                borders.get_bottom_border_mut().set_border_style(style);
            }
        }
    }
}
