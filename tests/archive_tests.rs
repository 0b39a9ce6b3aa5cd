//! Tests for the tar.gz archive writer.

mod helpers;

use std::fs;
use std::io::Read;

use helpers::{archive_entry_names, write_file};
use overpack::Error;
use overpack::archive::archive_directory;
use overpack::report::NullReporter;

#[test]
fn test_members_are_named_by_base_name() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("stage-src");
    write_file(&source.join("a.txt"), "a\n");
    write_file(&source.join("sub/b.txt"), "b\n");

    let output = tmp.path().join("out.tar.gz");
    archive_directory(&output, &source, &NullReporter).unwrap();

    let entries = archive_entry_names(&output);
    assert!(entries.contains(&"a.txt".to_string()), "{entries:?}");
    assert!(entries.contains(&"sub".to_string()), "{entries:?}");
    assert!(entries.contains(&"sub/b.txt".to_string()), "{entries:?}");
    assert!(
        entries.iter().all(|name| !name.contains("stage-src")),
        "source directory prefix leaked into {entries:?}"
    );
}

#[test]
fn test_empty_source_produces_valid_archive() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("empty");
    fs::create_dir(&source).unwrap();

    let output = tmp.path().join("out.tar.gz");
    archive_directory(&output, &source, &NullReporter).unwrap();

    assert!(archive_entry_names(&output).is_empty());
}

#[test]
fn test_gzip_stream_is_well_formed() {
    use flate2::read::GzDecoder;

    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("source");
    write_file(&source.join("data.bin"), "payload\n");

    let output = tmp.path().join("out.tar.gz");
    archive_directory(&output, &source, &NullReporter).unwrap();

    // A truncated gzip stream fails on read-to-end; a fully flushed one
    // decodes cleanly.
    let mut decoder = GzDecoder::new(fs::File::open(&output).unwrap());
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed).unwrap();
    assert!(!decompressed.is_empty());
}

#[test]
fn test_missing_output_parent_is_archive_error() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("source");
    write_file(&source.join("a.txt"), "a\n");

    let output = tmp.path().join("missing-dir/out.tar.gz");
    let err = archive_directory(&output, &source, &NullReporter).unwrap_err();
    assert!(matches!(err, Error::ArchiveWrite { .. }), "{err}");
    assert!(!output.exists());
}

#[test]
fn test_missing_source_is_filesystem_error() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("nonexistent");

    let output = tmp.path().join("out.tar.gz");
    let err = archive_directory(&output, &source, &NullReporter).unwrap_err();
    assert!(matches!(err, Error::Filesystem { .. }), "{err}");
}

#[cfg(unix)]
#[test]
fn test_symlinks_stored_as_symlinks() {
    use helpers::unpack_archive;
    use std::os::unix::fs::symlink;

    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("source");
    write_file(&source.join("target.txt"), "target\n");
    symlink("target.txt", source.join("link.txt")).unwrap();

    let output = tmp.path().join("out.tar.gz");
    archive_directory(&output, &source, &NullReporter).unwrap();

    let extracted = tmp.path().join("extracted");
    unpack_archive(&output, &extracted);

    let link = extracted.join("link.txt");
    let meta = fs::symlink_metadata(&link).unwrap();
    assert!(meta.file_type().is_symlink());
    assert_eq!(
        fs::read_link(&link).unwrap().to_string_lossy(),
        "target.txt"
    );
}

#[cfg(unix)]
#[test]
fn test_executable_mode_survives_archiving() {
    use helpers::unpack_archive;
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("source");
    let script = source.join("run.sh");
    write_file(&script, "#!/bin/sh\nexit 0\n");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let output = tmp.path().join("out.tar.gz");
    archive_directory(&output, &source, &NullReporter).unwrap();

    let extracted = tmp.path().join("extracted");
    unpack_archive(&output, &extracted);

    let mode = fs::metadata(extracted.join("run.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_ne!(mode & 0o111, 0, "mode {mode:o}");
}
