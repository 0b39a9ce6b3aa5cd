//! Overpack packages a built workspace and its runtime dependencies
//! into deployable overlay archives.
//!
//! Two archives are produced: a workspace overlay holding the compiled
//! install tree plus environment setup scripts, and a dependencies
//! overlay holding extracted third-party packages plus matching setup
//! scripts. Extracting both on top of each other and sourcing the
//! setup scripts recreates the build-time environment on another host.

pub mod archive;
pub mod config;
pub mod error;
pub mod overlay;
pub mod report;
pub mod result;
pub mod setup;
pub mod shebang;
pub mod tpl;
pub mod utils;

pub use error::Error;
pub use overlay::{build_dependencies_overlay, build_workspace_overlay};
pub use report::{NullReporter, Reporter, TerminalReporter};
pub use result::Result;
