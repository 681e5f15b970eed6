//! Canonical field vocabulary
//!
//! Input spreadsheets name the same semantic column in many ways
//! ("Condition State", "condition-state:", "ConditionState"). Every header is
//! reduced to a lookup key (lowercased, non-alphanumerics stripped) and mapped
//! onto one of the fixed template field names below. Headers that match
//! nothing are ignored by the caller, never treated as an error.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// The closed set of template field names. Every normalized record carries
/// exactly these keys; the set never grows at runtime.
pub const TEMPLATE_FIELDS: [&str; 24] = [
    "BIN",
    "Inspection Date",
    "Team Leader",
    "Asst Team Leader",
    "Span",
    "Location",
    "Weather",
    "Notes",
    "Condition Location",
    "Condition Note",
    "Condition State:",
    "References Photo(s):",
    "References Sketch(es)",
    "CS0",
    "CS1",
    "CS2",
    "CS3",
    "CS4",
    "CS5",
    "Description",
    "Attachment Description",
    "Photo Number",
    "Photo Filename",
    "Photo Path",
];

pub const BIN: &str = "BIN";
pub const PHOTO_FILENAME: &str = "Photo Filename";
pub const PHOTO_PATH: &str = "Photo Path";

lazy_static! {
    /// Canonicalized header variant -> template field name.
    static ref VARIANT_MAP: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("bin", "BIN");
        m.insert("inspectiondate", "Inspection Date");
        m.insert("teamleader", "Team Leader");
        m.insert("asstteamleader", "Asst Team Leader");
        m.insert("assistantteamleader", "Asst Team Leader");
        m.insert("span", "Span");
        m.insert("location", "Location");
        m.insert("weather", "Weather");
        m.insert("notes", "Notes");
        m.insert("conditionlocation", "Condition Location");
        m.insert("member", "Condition Location");
        m.insert("conditionnote", "Condition Note");
        m.insert("conditionstate", "Condition State:");
        m.insert("condition", "Condition State:");
        m.insert("referencesphotos", "References Photo(s):");
        m.insert("referencessketches", "References Sketch(es)");
        m.insert("referencesketches", "References Sketch(es)");
        m.insert("cs0", "CS0");
        m.insert("cs1", "CS1");
        m.insert("cs2", "CS2");
        m.insert("cs3", "CS3");
        m.insert("cs4", "CS4");
        m.insert("cs5", "CS5");
        m.insert("narrative", "Description");
        m.insert("description", "Description");
        m.insert("attachmentdescription", "Attachment Description");
        m.insert("photonumber", "Photo Number");
        m.insert("photofilename", "Photo Filename");
        m.insert("photopath", "Photo Path");
        m
    };
}

/// Reduce a header to its lookup key: trim, lowercase, keep `[a-z0-9]` only.
fn canonical_key(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Map a free-text column header onto a template field name.
///
/// Returns `None` for unrecognized headers; callers drop the column.
pub fn canonicalize(header: &str) -> Option<&'static str> {
    VARIANT_MAP.get(canonical_key(header).as_str()).copied()
}
