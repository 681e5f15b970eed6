//! Photo resolution
//!
//! Each record carries a folder ("Photo Path") and one or more filename hints
//! ("Photo Filename"). Resolution turns those into concrete files on disk:
//! exact name first, then extension inference, then prefix matching. The
//! contract is strictly best-effort: missing folders or files shrink the
//! result, they never fail the record.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Capacity of the result, matching the two photo slots in the page layout
/// (see [`crate::template::PHOTO_SLOTS`]).
pub const MAX_PHOTOS: usize = 2;

/// Known image extensions, tried in this order in both letter cases.
pub const IMAGE_EXTENSIONS: [&str; 14] = [
    ".jpg", ".jpeg", ".png", ".bmp", ".tif", ".tiff", ".gif",
    ".JPG", ".JPEG", ".PNG", ".BMP", ".TIF", ".TIFF", ".GIF",
];

/// Split a filename-hint cell on `;`, `,` or `|`, trimming surrounding
/// whitespace and quotes from each piece. Empty pieces are dropped.
pub fn split_hints(raw: &str) -> Vec<String> {
    raw.split([';', ',', '|'])
        .map(|piece| {
            piece
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .trim()
                .to_string()
        })
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Resolve a folder and filename hints to at most [`MAX_PHOTOS`] existing
/// image files.
///
/// A relative folder is resolved against `base_dir`, the directory holding
/// the input workbook. Per hint the lookup tries, in order: the exact path,
/// the hint with each known extension appended (only when the hint has no
/// extension of its own), and finally a prefix match over the folder's
/// direct entries. Results are deduplicated in first-seen order and capped.
pub fn resolve(folder: &str, name_hints: &str, base_dir: &Path) -> Vec<PathBuf> {
    let folder = folder.trim();
    let hints = split_hints(name_hints);
    if folder.is_empty() || hints.is_empty() {
        return Vec::new();
    }

    let mut dir = PathBuf::from(folder);
    if dir.is_relative() {
        dir = base_dir.join(dir);
    }

    let mut found: Vec<PathBuf> = Vec::new();
    for hint in &hints {
        // Exact name, extension included.
        let exact = dir.join(hint);
        if exact.is_file() {
            found.push(exact);
            continue;
        }

        // Hint without extension: try the known ones.
        if Path::new(hint).extension().is_none() {
            if let Some(hit) = IMAGE_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{}{}", hint, ext)))
                .find(|p| p.is_file())
            {
                found.push(hit);
                continue;
            }
        }

        // Prefix match, e.g. "AA_113_2933" -> "AA_113_2933_north.jpg".
        found.extend(prefix_matches(&dir, hint));
    }

    // Dedupe preserving first-seen order, cap at the slot count.
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for path in found {
        if seen.insert(path.clone()) {
            resolved.push(path);
        }
        if resolved.len() >= MAX_PHOTOS {
            break;
        }
    }
    resolved
}

/// All files directly inside `dir` whose name starts with `hint` and ends
/// with a known image extension, sorted by file name per extension.
fn prefix_matches(dir: &Path, hint: &str) -> Vec<PathBuf> {
    let mut entries: Vec<(String, PathBuf)> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| (e.file_name().to_string_lossy().to_string(), e.into_path()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut matches = Vec::new();
    for ext in IMAGE_EXTENSIONS {
        for (name, path) in &entries {
            if name.starts_with(hint) && name.ends_with(ext) {
                matches.push(path.clone());
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap().write_all(b"img").unwrap();
        path
    }

    #[test]
    fn test_split_hints() {
        assert_eq!(split_hints("a;b,c|d"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_hints(" \"photo1.jpg\" ; 'photo2.jpg' "), vec!["photo1.jpg", "photo2.jpg"]);
        assert_eq!(split_hints(""), Vec::<String>::new());
        assert_eq!(split_hints(" ; , "), Vec::<String>::new());
    }

    #[test]
    fn test_empty_inputs_resolve_to_nothing() {
        let dir = tempdir().unwrap();
        assert!(resolve("", "photo", dir.path()).is_empty());
        assert!(resolve("photos", "", dir.path()).is_empty());
    }

    #[test]
    fn test_exact_match() {
        let dir = tempdir().unwrap();
        let expected = touch(dir.path(), "photo1.jpg");
        let result = resolve(&dir.path().to_string_lossy(), "photo1.jpg", Path::new("."));
        assert_eq!(result, vec![expected]);
    }

    #[test]
    fn test_extension_inference() {
        let dir = tempdir().unwrap();
        let expected = touch(dir.path(), "AA_113_2933.jpg");
        let result = resolve(&dir.path().to_string_lossy(), "AA_113_2933", Path::new("."));
        assert_eq!(result, vec![expected]);
    }

    #[test]
    fn test_prefix_match_collects_several() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "AA_113_2933_north.jpg");
        touch(dir.path(), "AA_113_2933_south.jpg");
        touch(dir.path(), "unrelated.jpg");
        let result = resolve(&dir.path().to_string_lossy(), "AA_113_2933", Path::new("."));
        assert_eq!(result.len(), 2);
        for path in &result {
            assert!(path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("AA_113_2933"));
        }
    }

    #[test]
    fn test_relative_folder_resolves_against_base_dir() {
        let base = tempdir().unwrap();
        std::fs::create_dir(base.path().join("photos")).unwrap();
        let expected = touch(&base.path().join("photos"), "p1.png");
        let result = resolve("photos", "p1.png", base.path());
        assert_eq!(result, vec![expected]);
    }

    #[test]
    fn test_dedupe_across_hints() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "same.jpg");
        // Both hints resolve to the same file; it appears once.
        let result = resolve(&dir.path().to_string_lossy(), "same.jpg;same", Path::new("."));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_capped_at_two() {
        let dir = tempdir().unwrap();
        for i in 0..5 {
            touch(dir.path(), &format!("cap_{}.jpg", i));
        }
        let result = resolve(&dir.path().to_string_lossy(), "cap_", Path::new("."));
        assert_eq!(result.len(), MAX_PHOTOS);
    }

    #[test]
    fn test_missing_folder_is_not_an_error() {
        let result = resolve("/nonexistent/folder/xyz", "photo", Path::new("."));
        assert!(result.is_empty());
    }

    #[test]
    fn test_all_results_exist() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "real.jpg");
        let result = resolve(&dir.path().to_string_lossy(), "real;ghost", Path::new("."));
        assert!(result.iter().all(|p| p.is_file()));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_hint_order_is_preserved() {
        let dir = tempdir().unwrap();
        let second = touch(dir.path(), "a_first.jpg");
        let first = touch(dir.path(), "z_last.jpg");
        let result = resolve(&dir.path().to_string_lossy(), "z_last;a_first", Path::new("."));
        assert_eq!(result, vec![first, second]);
    }
}
