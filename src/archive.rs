use std::fs::{self, File};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::Builder;

use crate::error::Error;
use crate::report::Reporter;
use crate::result::Result;

/// Gzip level for overlay archives. A middle setting: the archives are
/// large and rebuilt often, so compression time matters as much as size.
const COMPRESSION_LEVEL: u32 = 5;

/// Create a gzip-compressed tar of everything inside `source_dir`.
///
/// The immediate children of `source_dir` become the root members of the
/// archive under their own base names; `source_dir` itself is never a
/// member. Directory entries are recursed into by the tar writer, and
/// symlinks are stored as symlink entries.
pub fn archive_directory(output_path: &Path, source_dir: &Path, report: &dyn Reporter) -> Result<()> {
    report.step(&format!("Creating tar of {}", source_dir.display()));

    let tar_gz = File::create(output_path).map_err(|e| Error::archive(output_path, e))?;
    let enc = GzEncoder::new(tar_gz, Compression::new(COMPRESSION_LEVEL));
    let mut tar = Builder::new(enc);
    tar.follow_symlinks(false);

    for entry in fs::read_dir(source_dir).map_err(|e| Error::fs(source_dir, e))? {
        let entry = entry.map_err(|e| Error::fs(source_dir, e))?;
        let path = entry.path();
        let name = entry.file_name();
        let file_type = entry.file_type().map_err(|e| Error::fs(&path, e))?;

        report.detail(&format!("adding {}", name.to_string_lossy()));

        if file_type.is_dir() {
            tar.append_dir_all(&name, &path)
                .map_err(|e| Error::archive(output_path, e))?;
        } else {
            tar.append_path_with_name(&path, &name)
                .map_err(|e| Error::archive(output_path, e))?;
        }
    }

    // Finish both streams explicitly so flush errors surface instead of
    // disappearing in a drop.
    let enc = tar
        .into_inner()
        .map_err(|e| Error::archive(output_path, e))?;
    enc.finish().map_err(|e| Error::archive(output_path, e))?;

    Ok(())
}
