use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while assembling an overlay.
///
/// Nothing here is caught or retried internally; every variant propagates
/// to the caller, which is expected to surface the failure and abort the
/// packaging step. Filesystem and archive failures always carry the path
/// they refer to, so there is no blanket `From<io::Error>`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Custom(String),

    #[error("template not found: {0}")]
    MissingTemplate(String),

    #[error("{}: {}", .path.display(), .source)]
    Filesystem { path: PathBuf, source: io::Error },

    #[error("failed to write archive {}: {}", .path.display(), .source)]
    ArchiveWrite { path: PathBuf, source: io::Error },

    #[error("invalid bundle config {}: {}", .path.display(), .source)]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("terminal: {0}")]
    Terminal(io::Error),
}

impl Error {
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        Error::Custom(msg.into())
    }

    pub(crate) fn fs(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn archive(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::ArchiveWrite {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn config(path: impl AsRef<Path>, source: toml::de::Error) -> Self {
        Error::Config {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
