use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Which overlay to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Workspace { install_base: Option<PathBuf> },
    Dependencies,
}

/// Command-line arguments for the overpack tool
#[derive(Debug)]
pub struct Args {
    /// Enable verbose output
    pub verbose: bool,

    /// Path to an alternative configuration file
    pub config: Option<PathBuf>,

    /// Override for the staging directory
    pub staging: Option<PathBuf>,

    /// Override for the output archive path
    pub output: Option<PathBuf>,

    /// Selected overlay operation
    pub operation: Operation,
}

fn staging_arg() -> Arg {
    Arg::new("staging")
        .short('s')
        .long("staging")
        .value_name("DIR")
        .help("Directory to stage the overlay in")
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .help("Path of the overlay archive to write (.tar.gz)")
}

fn command() -> Command {
    Command::new("overpack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Packages a built workspace and its dependencies into overlay archives")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .env("OVERPACK_CONFIG")
                .global(true)
                .help("Path to the configuration file (default: ./overpack.toml)")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable verbose output")
        )
        .subcommand(
            Command::new("workspace")
                .about("Build the workspace overlay from a built install directory")
                .arg(
                    Arg::new("install-base")
                        .short('i')
                        .long("install-base")
                        .value_name("DIR")
                        .help("Install directory with the built workspace artifacts")
                )
                .arg(staging_arg())
                .arg(output_arg())
        )
        .subcommand(
            Command::new("dependencies")
                .alias("deps")
                .about("Build the dependencies overlay from a pre-populated staging directory")
                .arg(staging_arg())
                .arg(output_arg())
        )
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        Self::from_matches(command().get_matches())
    }

    fn from_matches(matches: ArgMatches) -> Self {
        // Global args are propagated into the subcommand matches, so
        // everything is read from there.
        let (operation, sub) = match matches.subcommand() {
            Some(("workspace", sub)) => {
                let install_base = sub.get_one::<String>("install-base").map(PathBuf::from);
                (Operation::Workspace { install_base }, sub)
            }
            Some(("dependencies", sub)) => (Operation::Dependencies, sub),
            _ => unreachable!("subcommand is required"),
        };

        Self {
            verbose: sub.get_flag("verbose"),
            config: sub.get_one::<String>("config").map(PathBuf::from),
            staging: sub.get_one::<String>("staging").map(PathBuf::from),
            output: sub.get_one::<String>("output").map(PathBuf::from),
            operation,
        }
    }
}
