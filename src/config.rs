use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::CompatError;
use crate::translate::Invocation;

#[derive(Debug)]
pub struct Config {
    pub verbose: bool,
    pub no_color: bool,
    pub ztc_path: PathBuf,
    pub invocation: Invocation,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, CompatError> {
        let ztc_path = cli.options.ztc_path;

        // ztc is addressed by a fixed location, never resolved through PATH
        if !ztc_path.is_absolute() {
            return Err(CompatError::Config(format!(
                "ztc path must be absolute: {}",
                ztc_path.display()
            )));
        }

        Ok(Self {
            verbose: cli.options.verbose,
            no_color: cli.options.no_color,
            ztc_path,
            invocation: Invocation::new(cli.command, cli.args),
        })
    }
}
