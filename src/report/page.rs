//! Page instantiation
//!
//! Clones the template layout for one record, writes the anchored field
//! values and places up to two resolved photos. Per-page failures (missing
//! anchors, undecodable images) are reported as counts on [`PageStats`] and
//! never abort the page, let alone the batch.

use crate::error::{ReportError, Result};
use crate::fields;
use crate::normalizer::Record;
use crate::photos;
use crate::template::{self, AnchorTable, PHOTO_BOX_H_PX, PHOTO_BOX_W_PX};
use image::imageops::FilterType;
use std::path::Path;
use umya_spreadsheet::structs::drawing::spreadsheet::MarkerType;
use umya_spreadsheet::structs::{Image, Spreadsheet, VerticalAlignmentValues, Worksheet};

/// What happened to one generated page.
#[derive(Debug, Clone, Default)]
pub struct PageStats {
    /// Final sheet title.
    pub title: String,
    /// Fields written at an anchored cell.
    pub fields_written: usize,
    /// Fields skipped because the anchor table has no cell for them.
    pub anchors_missing: usize,
    /// Photos successfully embedded.
    pub photos_placed: usize,
    /// Resolved photos that failed to decode or embed.
    pub photos_skipped: usize,
}

/// Outcome of one photo slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoPlacement {
    Placed,
    /// The file could not be decoded or embedded; the slot stays empty.
    Skipped,
}

/// Clone the template sheet for `record`, fill it in and append it to the
/// workbook. `index` is the 1-based record sequence number.
pub fn render_page(
    book: &mut Spreadsheet,
    template_sheet: &Worksheet,
    anchors: &AnchorTable,
    record: &Record,
    index: usize,
    base_dir: &Path,
) -> Result<PageStats> {
    let mut title = safe_title(&format!("{}_{}", record.get(fields::BIN), index));
    if title.is_empty() || book.get_sheet_by_name(&title).is_some() {
        // Empty identifier, or a long identifier whose sequence suffix got
        // truncated away and now collides with an earlier page.
        title = format!("Report_{}", index);
    }

    let mut sheet = template_sheet.clone();
    sheet.set_name(title.as_str());

    let mut stats = PageStats {
        title,
        ..Default::default()
    };

    for field in fields::TEMPLATE_FIELDS {
        if field == fields::PHOTO_PATH {
            continue;
        }
        match anchors.get(field) {
            Some(cell) => {
                sheet.get_cell_mut(cell.as_str()).set_value(record.get(field));
                let alignment = sheet.get_style_mut(cell.as_str()).get_alignment_mut();
                alignment.set_wrap_text(true);
                alignment.set_vertical(VerticalAlignmentValues::Top);
                stats.fields_written += 1;
            }
            None => stats.anchors_missing += 1,
        }
    }

    let resolved = photos::resolve(
        record.get(fields::PHOTO_PATH),
        record.get(fields::PHOTO_FILENAME),
        base_dir,
    );
    for (slot, path) in template::PHOTO_SLOTS.iter().zip(&resolved) {
        match place_photo(&mut sheet, slot, path) {
            PhotoPlacement::Placed => stats.photos_placed += 1,
            PhotoPlacement::Skipped => stats.photos_skipped += 1,
        }
    }

    book.add_sheet(sheet)
        .map_err(|e| ReportError::Spreadsheet(e.to_string()))?;
    Ok(stats)
}

/// Strip characters Excel rejects in sheet titles and cap at 31 chars.
pub fn safe_title(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .take(31)
        .collect()
}

/// Uniform scale of `image` to fit within `bounds`, preserving aspect ratio.
/// Matches the slot sizing rule: scale = min(boxW/w, boxH/h).
pub fn fitted_size(image: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (w, h) = image;
    let (bw, bh) = bounds;
    if w == 0 || h == 0 {
        return (1, 1);
    }
    let scale = f64::min(bw as f64 / w as f64, bh as f64 / h as f64);
    (
        ((w as f64 * scale) as u32).max(1),
        ((h as f64 * scale) as u32).max(1),
    )
}

/// Embed one photo at a slot anchor, scaled to the photo bounding box.
///
/// The image file is opened, scaled and released within this call; any
/// decode or re-encode failure leaves the slot empty.
fn place_photo(sheet: &mut Worksheet, anchor: &str, path: &Path) -> PhotoPlacement {
    let img = match image::open(path) {
        Ok(img) => img,
        Err(_) => return PhotoPlacement::Skipped,
    };

    let (width, height) = fitted_size(
        (img.width(), img.height()),
        (PHOTO_BOX_W_PX, PHOTO_BOX_H_PX),
    );
    let resized = img.resize_exact(width, height, FilterType::Triangle);

    // xlsx drawings render the embedded pixels 1:1, so resizing the bitmap
    // is what fixes the displayed size. PNG keeps bmp/tif inputs embeddable.
    let scratch = match tempfile::Builder::new()
        .prefix("inspection-photo-")
        .suffix(".png")
        .tempfile()
    {
        Ok(file) => file,
        Err(_) => return PhotoPlacement::Skipped,
    };
    if resized
        .save_with_format(scratch.path(), image::ImageFormat::Png)
        .is_err()
    {
        return PhotoPlacement::Skipped;
    }

    let mut marker = MarkerType::default();
    marker.set_coordinate(anchor);
    let mut embedded = Image::default();
    embedded.new_image(&scratch.path().to_string_lossy(), marker);
    sheet.add_image(embedded);
    PhotoPlacement::Placed
}
