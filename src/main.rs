mod args;

use std::path::Path;

use args::{Args, Operation};
use overpack::config::Config;
use overpack::error::Error;
use overpack::report::TerminalReporter;
use overpack::result::Result;
use overpack::{build_dependencies_overlay, build_workspace_overlay, utils};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse command-line arguments
    let Args {
        verbose,
        config,
        staging,
        output,
        operation,
    } = Args::parse();

    // Use cliclack for nice UI
    cliclack::intro("overpack").map_err(Error::Terminal)?;

    // Load configuration
    let config = {
        let spinner = cliclack::spinner();
        spinner.start("Loading configuration...");
        match Config::locate(config) {
            Some(path) => match Config::load(&path) {
                Ok(c) => {
                    spinner.stop(format!("Loaded {}", path.display()));
                    c
                }
                Err(e) => {
                    spinner.error("Failed to load configuration");
                    return Err(e);
                }
            },
            None => {
                spinner.stop("No overpack.toml found, using defaults");
                Config::default()
            }
        }
    };

    let report = TerminalReporter::new(verbose);

    match operation {
        Operation::Workspace { install_base } => {
            let install_base = install_base.unwrap_or(config.workspace.install_base);
            let staging = staging.unwrap_or(config.workspace.staging);
            let output = output.unwrap_or(config.workspace.output);

            prepare_output_dir(&output)?;
            build_workspace_overlay(&install_base, &staging, &output, &report)?;

            cliclack::outro(format!("Workspace overlay created at {}", output.display()))
                .map_err(Error::Terminal)?;
        }
        Operation::Dependencies => {
            let staging = staging.unwrap_or(config.dependencies.staging);
            let output = output.unwrap_or(config.dependencies.output);

            prepare_output_dir(&output)?;
            build_dependencies_overlay(&staging, &output, &report)?;

            cliclack::outro(format!(
                "Dependencies overlay created at {}",
                output.display()
            ))
            .map_err(Error::Terminal)?;
        }
    }

    Ok(())
}

/// The archive writer opens its output file directly and does not
/// create parent directories on its own.
fn prepare_output_dir(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        utils::ensure_dir(parent)?;
    }
    Ok(())
}
