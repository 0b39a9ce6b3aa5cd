//! Shared test utilities for overlay and archive tests.

use std::fs::{self, File};
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

/// Write a file, creating parent directories as needed.
pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, contents).expect("Failed to write file");
}

/// List the member names of a tar.gz archive. Directory entries are
/// normalized without their trailing slash.
pub fn archive_entry_names(archive_path: &Path) -> Vec<String> {
    let file = File::open(archive_path).expect("Failed to open archive");
    let mut archive = Archive::new(GzDecoder::new(file));
    archive
        .entries()
        .expect("Failed to read archive entries")
        .map(|entry| {
            let entry = entry.expect("Failed to read archive entry");
            let path = entry.path().expect("Entry has invalid path");
            path.to_string_lossy().trim_end_matches('/').to_string()
        })
        .collect()
}

/// Extract a tar.gz archive into the given directory.
pub fn unpack_archive(archive_path: &Path, destination: &Path) {
    fs::create_dir_all(destination).expect("Failed to create unpack dir");
    let file = File::open(archive_path).expect("Failed to open archive");
    let mut archive = Archive::new(GzDecoder::new(file));
    archive.unpack(destination).expect("Failed to unpack archive");
}
