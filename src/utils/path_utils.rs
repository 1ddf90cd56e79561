//! Output path derivation
//!
//! Utilities for turning an input RAW filename plus a channel suffix into
//! a non-colliding FITS destination path.

use std::path::{Path, PathBuf};

/// Extension used for all written output files
pub const OUTPUT_EXTENSION: &str = "fits";

/// Derives the output path for a given input file and channel suffix
///
/// The input's extension is located at the LAST `.` of the file name, so
/// `my.photo.cr2` with suffix `_G` becomes `my.photo_G.fits`. A file name
/// without any `.` keeps its full name as the stem. The directory part of
/// the input path is preserved.
///
/// # Arguments
/// * `input` - Path to the source RAW file
/// * `suffix` - Channel suffix to insert, e.g. `_R` or `_raw`
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Split at the last dot of the file name, not the first
    let stem = match file_name.rfind('.') {
        Some(idx) => &file_name[..idx],
        None => &file_name[..],
    };

    let out_name = format!("{}{}.{}", stem, suffix, OUTPUT_EXTENSION);
    match input.parent() {
        Some(dir) => dir.join(out_name),
        None => PathBuf::from(out_name),
    }
}

/// Returns a path that does not collide with any existing file
///
/// If `candidate` does not exist it is returned unchanged. Otherwise a
/// numeric disambiguator is inserted before the extension (`_1`, `_2`, ...)
/// until an unused path is found, so repeated conversions never overwrite
/// earlier output.
pub fn unique_path(candidate: PathBuf) -> PathBuf {
    if !candidate.exists() {
        return candidate;
    }

    let file_name = candidate
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match file_name.rfind('.') {
        Some(idx) => &file_name[..idx],
        None => &file_name[..],
    };

    let mut counter = 1u32;
    loop {
        let next_name = format!("{}_{}.{}", stem, counter, OUTPUT_EXTENSION);
        let next = match candidate.parent() {
            Some(dir) => dir.join(next_name),
            None => PathBuf::from(next_name),
        };
        if !next.exists() {
            return next;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_before_extension() {
        let out = derive_output_path(Path::new("photo.cr2"), "_R");
        assert_eq!(out, PathBuf::from("photo_R.fits"));
    }

    #[test]
    fn test_last_dot_wins() {
        let out = derive_output_path(Path::new("my.photo.cr2"), "_G");
        assert_eq!(out, PathBuf::from("my.photo_G.fits"));
    }

    #[test]
    fn test_directory_preserved() {
        let out = derive_output_path(Path::new("/data/shots/img_0001.nef"), "_B");
        assert_eq!(out, PathBuf::from("/data/shots/img_0001_B.fits"));
    }

    #[test]
    fn test_dotless_name() {
        let out = derive_output_path(Path::new("scan"), "_raw");
        assert_eq!(out, PathBuf::from("scan_raw.fits"));
    }

    #[test]
    fn test_unique_path_counts_up() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("img_R.fits");
        std::fs::write(&first, b"x").unwrap();
        let second = unique_path(first.clone());
        assert_eq!(second, dir.path().join("img_R_1.fits"));

        std::fs::write(&second, b"x").unwrap();
        let third = unique_path(first);
        assert_eq!(third, dir.path().join("img_R_2.fits"));
    }

    #[test]
    fn test_unique_path_untouched_when_free() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = dir.path().join("img_G.fits");
        assert_eq!(unique_path(candidate.clone()), candidate);
    }
}
