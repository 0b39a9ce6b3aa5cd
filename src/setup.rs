//! Setup script rendering.
//!
//! Every overlay carries a `setup.sh`/`setup.bash` pair rendered from one
//! template; the `shell` variable selects the shell-specific lines. The
//! templates are compiled into the binary, so a built overpack needs no
//! asset directory at runtime.

use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::result::Result;
use crate::tpl::Tpl;

/// Template behind the workspace overlay's setup scripts.
pub const WORKSPACE_SETUP_TEMPLATE: &str = "workspace_setup.sh.in";

/// Template behind the dependencies overlay's setup scripts.
pub const DEPENDENCIES_SETUP_TEMPLATE: &str = "dependencies_setup.sh.in";

// Embedded template table: name to body, resolved at compile time.
static TEMPLATES: &[(&str, &str)] = &[
    (
        WORKSPACE_SETUP_TEMPLATE,
        include_str!("../assets/workspace_setup.sh.in"),
    ),
    (
        DEPENDENCIES_SETUP_TEMPLATE,
        include_str!("../assets/dependencies_setup.sh.in"),
    ),
];

/// Shells a setup script pair is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Sh,
    Bash,
}

impl Shell {
    /// Both shells, in the order the scripts are rendered.
    pub const ALL: [Shell; 2] = [Shell::Sh, Shell::Bash];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shell::Sh => "sh",
            Shell::Bash => "bash",
        }
    }

    /// File name of the rendered script, `setup.sh` or `setup.bash`.
    pub fn setup_file_name(&self) -> String {
        format!("setup.{}", self.as_str())
    }

    /// Template variables for this shell.
    pub fn vars(&self) -> Tpl {
        let mut vars = Tpl::new();
        vars.register("shell", self.as_str());
        vars
    }
}

fn template_body(name: &str) -> Result<&'static str> {
    TEMPLATES
        .iter()
        .find(|(template_name, _)| *template_name == name)
        .map(|(_, body)| *body)
        .ok_or_else(|| Error::MissingTemplate(name.to_string()))
}

/// Render a named template to `destination` and mark it executable.
///
/// The rendered text is exactly the template body with `vars` substituted;
/// shell syntax passes through unescaped and the template's trailing
/// newline is kept. Fails if the template name is unknown or if
/// `destination`'s parent directory does not exist.
pub fn render_script(template_name: &str, destination: &Path, vars: &Tpl) -> Result<()> {
    let rendered = vars.parse(template_body(template_name)?);
    fs::write(destination, rendered).map_err(|e| Error::fs(destination, e))?;
    make_executable(destination)
}

/// Render the `setup.sh`/`setup.bash` pair into `staging_path`.
///
/// The two scripts always land together; an overlay with only one of them
/// is malformed.
pub fn render_setup_scripts(template_name: &str, staging_path: &Path) -> Result<()> {
    for shell in Shell::ALL {
        let destination = staging_path.join(shell.setup_file_name());
        render_script(template_name, &destination, &shell.vars())?;
    }
    Ok(())
}

// Adds execute permission on top of whatever mode the file already has.
#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .map_err(|e| Error::fs(path, e))?
        .permissions();
    perms.set_mode(perms.mode() | 0o111);
    fs::set_permissions(path, perms).map_err(|e| Error::fs(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
