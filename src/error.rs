use thiserror::Error;

use crate::exit_codes;

#[derive(Error, Debug)]
pub enum CompatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Cli(#[from] clap::Error),
}

impl CompatError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CompatError::Config(_) => exit_codes::CLI_ARGS,
            CompatError::Cli(error) => error.exit_code(),
        }
    }

    /// Text for stderr. clap errors already carry their own `error:` label
    /// and usage hint, so they are printed as clap renders them.
    pub fn report(&self) -> String {
        match self {
            CompatError::Config(_) => format!("Error: {self}\n"),
            CompatError::Cli(error) => error.render().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompatError>;
