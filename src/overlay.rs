use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::archive;
use crate::error::Error;
use crate::report::Reporter;
use crate::result::Result;
use crate::setup::{self, DEPENDENCIES_SETUP_TEMPLATE, WORKSPACE_SETUP_TEMPLATE};
use crate::shebang;
use crate::utils;

/// Location of the copied workspace inside the workspace overlay.
/// The rendered setup scripts chain into the setup file found here.
pub const WORKSPACE_INSTALL_PREFIX: &str = "opt/built_workspace";

/// Build the workspace overlay archive from a built install directory.
///
/// Stages a fresh tree at `staging_path` containing `setup.sh`,
/// `setup.bash` and a copy of `install_base` under `opt/built_workspace`,
/// rewrites hard-coded shebang lines so scripts survive relocation, and
/// archives the staging tree to `overlay_path`.
pub fn build_workspace_overlay(
    install_base: &Path,
    staging_path: &Path,
    overlay_path: &Path,
    report: &dyn Reporter,
) -> Result<()> {
    // Catch a bad install base before touching staging or the archive.
    let meta = fs::metadata(install_base).map_err(|e| Error::fs(install_base, e))?;
    if !meta.is_dir() {
        return Err(Error::custom(format!(
            "install base {} is not a directory",
            install_base.display()
        )));
    }

    report.step(&format!(
        "Staging workspace overlay from {}",
        install_base.display()
    ));

    // Start from an empty staging directory; leftovers from a previous
    // or killed run must not leak into the archive.
    match fs::remove_dir_all(staging_path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(Error::fs(staging_path, e)),
    }
    fs::create_dir_all(staging_path).map_err(|e| Error::fs(staging_path, e))?;

    setup::render_setup_scripts(WORKSPACE_SETUP_TEMPLATE, staging_path)?;
    report.detail("rendered setup.sh and setup.bash");

    let workspace_dest = staging_path.join(WORKSPACE_INSTALL_PREFIX);
    report.detail(&format!(
        "copying {} to {}",
        install_base.display(),
        workspace_dest.display()
    ));
    utils::copy_tree(install_base, &workspace_dest)?;

    // Relocated scripts must not point at build-host interpreters.
    let rewritten = shebang::update_shebangs(staging_path, report)?;
    if rewritten > 0 {
        report.step(&format!("Rewrote {rewritten} hard-coded shebang line(s)"));
    }

    archive::archive_directory(overlay_path, staging_path, report)?;
    Ok(())
}

/// Build the dependencies overlay archive from an already-populated
/// staging directory.
///
/// The caller is responsible for extracting dependency files into
/// `staging_path` beforehand; this renders the setup script pair on
/// top, removes any stale archive at `overlay_path` and archives the
/// staging tree.
pub fn build_dependencies_overlay(
    staging_path: &Path,
    overlay_path: &Path,
    report: &dyn Reporter,
) -> Result<()> {
    report.step(&format!(
        "Dependencies changed, updating {}",
        overlay_path.display()
    ));

    setup::render_setup_scripts(DEPENDENCIES_SETUP_TEMPLATE, staging_path)?;
    report.detail("rendered setup.sh and setup.bash");

    // Delete the old archive up front; a truncated leftover from a
    // failed rebuild must not pass for a current overlay.
    if overlay_path.exists() {
        fs::remove_file(overlay_path).map_err(|e| Error::fs(overlay_path, e))?;
    }

    archive::archive_directory(overlay_path, staging_path, report)?;
    Ok(())
}
