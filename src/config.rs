use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::result::Result;

/// Configuration file looked up in the current directory when no
/// explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "overpack.toml";

const DEFAULT_INSTALL_BASE: &str = "install";
const DEFAULT_WORKSPACE_STAGING: &str = "bundle/workspace-staging";
const DEFAULT_WORKSPACE_OUTPUT: &str = "bundle/workspace-overlay.tar.gz";
const DEFAULT_DEPENDENCIES_STAGING: &str = "bundle/dependencies-staging";
const DEFAULT_DEPENDENCIES_OUTPUT: &str = "bundle/dependencies-overlay.tar.gz";

/// Resolved tool configuration. All paths are absolute or anchored to
/// the directory containing the configuration file they came from.
#[derive(Debug, Clone)]
pub struct Config {
    pub workspace: WorkspacePaths,
    pub dependencies: DependencyPaths,
}

#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub install_base: PathBuf,
    pub staging: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DependencyPaths {
    pub staging: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    workspace: WorkspaceSection,
    #[serde(default)]
    dependencies: DependenciesSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkspaceSection {
    #[serde(rename = "install-base")]
    install_base: Option<PathBuf>,
    staging: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DependenciesSection {
    staging: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl Config {
    /// Resolve the configuration file to read: an explicitly supplied
    /// path wins, otherwise `overpack.toml` in the current directory if
    /// it exists.
    pub fn locate(explicit: Option<PathBuf>) -> Option<PathBuf> {
        if explicit.is_some() {
            return explicit;
        }
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    }

    /// Load and resolve a configuration file.
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| Error::fs(path, e))?;
        let file: ConfigFile = toml::from_str(&text).map_err(|e| Error::config(path, e))?;
        let base_dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        Ok(resolve(file, base_dir))
    }
}

impl Default for Config {
    fn default() -> Self {
        resolve(ConfigFile::default(), None)
    }
}

/// Relative paths in a config file are anchored to the file's own
/// directory, so the tool behaves identically from any working
/// directory.
fn resolve(file: ConfigFile, base_dir: Option<&Path>) -> Config {
    let anchor = |path: PathBuf| -> PathBuf {
        match base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    };
    let or_default = |value: Option<PathBuf>, default: &str| -> PathBuf {
        anchor(value.unwrap_or_else(|| PathBuf::from(default)))
    };

    Config {
        workspace: WorkspacePaths {
            install_base: or_default(file.workspace.install_base, DEFAULT_INSTALL_BASE),
            staging: or_default(file.workspace.staging, DEFAULT_WORKSPACE_STAGING),
            output: or_default(file.workspace.output, DEFAULT_WORKSPACE_OUTPUT),
        },
        dependencies: DependencyPaths {
            staging: or_default(file.dependencies.staging, DEFAULT_DEPENDENCIES_STAGING),
            output: or_default(file.dependencies.output, DEFAULT_DEPENDENCIES_OUTPUT),
        },
    }
}
