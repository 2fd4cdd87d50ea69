use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser};

use crate::dispatch::DEFAULT_ZTC_PATH;
use crate::translate::LegacyCommand;

/// Legacy entry points for ztc
///
/// Translates invocations of the retired fix.py, prepare.py and scan.py
/// scripts into the equivalent ztc command, or refuses with an explanation
/// when no safe translation exists.
///
/// Installed under a legacy name (e.g. a scan.py symlink) every argument is
/// treated as a legacy argument.
#[derive(Parser, Debug)]
#[command(name = "ztc-compat")]
#[command(version)]
#[command(about, long_about)]
pub struct Cli {
    #[command(flatten)]
    pub options: ShimOptions,

    /// Legacy entry point to emulate
    #[arg(value_enum)]
    pub command: LegacyCommand,

    /// Arguments exactly as the legacy script would have received them
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<OsString>,
}

/// Options of the shim itself. Long-only, so legacy short flags never clash.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ShimOptions {
    /// Enable verbose output for debugging
    #[arg(long = "verbose", env = "ZTC_COMPAT_VERBOSE")]
    pub verbose: bool,

    /// Suppress colored output
    #[arg(long = "no-color", env = "ZTC_COMPAT_NO_COLOR")]
    pub no_color: bool,

    /// Absolute path of the ztc binary
    #[arg(long = "ztc-path", env = "ZTC_COMPAT_ZTC_PATH", default_value = DEFAULT_ZTC_PATH)]
    pub ztc_path: PathBuf,
}

/// Environment-only view of [`ShimOptions`] for multi-call invocations.
#[derive(Parser, Debug)]
#[command(name = "ztc-compat")]
struct EntryPointCli {
    #[command(flatten)]
    options: ShimOptions,
}

impl Cli {
    /// Builds the CLI for an invocation under a legacy program name. No
    /// argument is interpreted by the shim; options come from the environment.
    pub fn for_entry_point(
        command: LegacyCommand,
        args: Vec<OsString>,
    ) -> Result<Self, clap::Error> {
        let EntryPointCli { options } = EntryPointCli::try_parse_from([command.legacy_name()])?;
        Ok(Self {
            options,
            command,
            args,
        })
    }
}
