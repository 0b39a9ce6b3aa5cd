use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::Error;
use crate::report::Reporter;
use crate::result::Result;

/// Interpreters present at the same location on every supported
/// distribution. Scripts pointing at these run unchanged after
/// relocation, so their shebang lines are left alone.
const STABLE_INTERPRETERS: &[&str] = &["/bin/sh", "/bin/bash", "/usr/bin/sh", "/usr/bin/bash"];

/// Longest first line still treated as a shebang. Binary files can start
/// with `#!` by coincidence; a line this long is not an interpreter path.
const MAX_SHEBANG_LEN: usize = 256;

/// Walk `root` and rewrite absolute shebang lines to `#!/usr/bin/env`
/// form so relocated scripts resolve their interpreter from `PATH`.
///
/// Returns the number of files rewritten. Non-script files, relative
/// shebangs, `env`-based shebangs and interpreters listed in
/// [`STABLE_INTERPRETERS`] are skipped.
pub fn update_shebangs(root: &Path, report: &dyn Reporter) -> Result<usize> {
    let mut rewritten = 0;

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            match e.into_io_error() {
                Some(source) => Error::Filesystem { path, source },
                None => Error::custom(format!("walk failed under {}", path.display())),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if update_file_shebang(entry.path(), report)? {
            rewritten += 1;
        }
    }

    Ok(rewritten)
}

fn update_file_shebang(path: &Path, report: &dyn Reporter) -> Result<bool> {
    let mut file = File::open(path).map_err(|e| Error::fs(path, e))?;

    let mut probe = [0u8; 2];
    if file.read_exact(&mut probe).is_err() {
        // Shorter than two bytes, nothing to rewrite.
        return Ok(false);
    }
    if &probe != b"#!" {
        return Ok(false);
    }

    let mut rest = Vec::new();
    file.read_to_end(&mut rest).map_err(|e| Error::fs(path, e))?;

    let line_end = match rest.iter().position(|&b| b == b'\n') {
        Some(pos) => pos,
        // A script can legitimately end without a trailing newline.
        None => rest.len(),
    };
    if line_end > MAX_SHEBANG_LEN {
        return Ok(false);
    }
    let Ok(line) = std::str::from_utf8(&rest[..line_end]) else {
        return Ok(false);
    };

    let Some(replacement) = rewritten_shebang(line) else {
        return Ok(false);
    };

    let mut contents = Vec::with_capacity(2 + replacement.len() + rest.len() - line_end);
    contents.extend_from_slice(b"#!");
    contents.extend_from_slice(replacement.as_bytes());
    contents.extend_from_slice(&rest[line_end..]);
    // fs::write truncates in place, keeping the execute bits intact.
    fs::write(path, contents).map_err(|e| Error::fs(path, e))?;

    report.detail(&format!("rewrote shebang in {}", path.display()));
    Ok(true)
}

/// Decide the replacement interpreter line (without the `#!` prefix) for
/// a shebang line, or `None` when the line should be kept as-is.
fn rewritten_shebang(line: &str) -> Option<String> {
    let line = line.trim();
    if !line.starts_with('/') {
        return None;
    }
    // An interpreter argument cannot survive the switch to env lookup.
    if line.contains(char::is_whitespace) {
        return None;
    }
    if line.ends_with("/env") {
        return None;
    }
    if STABLE_INTERPRETERS.contains(&line) {
        return None;
    }

    let name = line.rsplit('/').next()?;
    if name.is_empty() {
        return None;
    }
    Some(format!("/usr/bin/env {name}"))
}
