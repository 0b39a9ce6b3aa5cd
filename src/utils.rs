use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::result::Result;

/// Copy the directory `source` to `destination` recursively.
///
/// `destination` must not already exist (missing parents are created).
/// Symlinks are dereferenced, so the copy holds regular files only; file
/// permission bits survive the copy.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::fs(parent, e))?;
    }
    // AlreadyExists from a pre-existing destination propagates from here.
    fs::create_dir(destination).map_err(|e| Error::fs(destination, e))?;
    copy_dir_contents(source, destination)
}

fn copy_dir_contents(source: &Path, destination: &Path) -> Result<()> {
    for entry in fs::read_dir(source).map_err(|e| Error::fs(source, e))? {
        let entry = entry.map_err(|e| Error::fs(source, e))?;
        let file_type = entry.file_type().map_err(|e| Error::fs(entry.path(), e))?;
        let src_path = entry.path();
        let dst_path = destination.join(entry.file_name());

        if file_type.is_dir() {
            fs::create_dir(&dst_path).map_err(|e| Error::fs(&dst_path, e))?;
            copy_dir_contents(&src_path, &dst_path)?;
        } else if file_type.is_symlink()
            && fs::metadata(&src_path)
                .map_err(|e| Error::fs(&src_path, e))?
                .is_dir()
        {
            // A symlink to a directory is copied as the directory it points at.
            fs::create_dir(&dst_path).map_err(|e| Error::fs(&dst_path, e))?;
            copy_dir_contents(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).map_err(|e| Error::fs(&src_path, e))?;
        }
    }

    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::fs(path, e))?;
    }
    Ok(())
}
