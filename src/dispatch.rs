use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;
use thiserror::Error;

use crate::diagnostics::Diagnostic;
use crate::translate::LegacyCommand;

/// Default installation path of ztc. Never looked up through `PATH`.
pub const DEFAULT_ZTC_PATH: &str = "/usr/bin/ztc";

/// Runs the downstream tool for a translated invocation.
pub trait Dispatcher {
    /// Executes `ztc <subcommand> <args...>` and returns its exit status.
    fn dispatch(&self, command: LegacyCommand, args: &[OsString]) -> Result<i32, DispatchError>;
}

/// Hands a translated invocation to the installed ztc binary.
///
/// On Unix the shim's process image is replaced, so the scheduler's signals
/// reach ztc directly and the exit status is ztc's own.
pub struct ZtcDispatcher {
    ztc_path: PathBuf,
}

impl ZtcDispatcher {
    pub fn new(ztc_path: impl Into<PathBuf>) -> Self {
        Self {
            ztc_path: ztc_path.into(),
        }
    }

    pub fn ztc_path(&self) -> &Path {
        &self.ztc_path
    }

    /// Verifies the configured path is a regular, executable file.
    pub fn ensure_executable(&self) -> Result<(), DispatchError> {
        let path = &self.ztc_path;
        let metadata = std::fs::metadata(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                DispatchError::NotFound { path: path.clone() }
            } else {
                DispatchError::Start {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        if !metadata.is_file() {
            return Err(DispatchError::NotExecutable { path: path.clone() });
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o111 == 0 {
                return Err(DispatchError::NotExecutable { path: path.clone() });
            }
        }

        Ok(())
    }

    fn command(&self, command: LegacyCommand, args: &[OsString]) -> Command {
        let mut cmd = Command::new(&self.ztc_path);
        cmd.arg(command.subcommand()).args(args);
        cmd
    }
}

impl Dispatcher for ZtcDispatcher {
    fn dispatch(&self, command: LegacyCommand, args: &[OsString]) -> Result<i32, DispatchError> {
        self.ensure_executable()?;

        debug!(
            "Executing {} {} {:?}",
            self.ztc_path.display(),
            command.subcommand(),
            args
        );

        run(self.command(command, args), &self.ztc_path)
    }
}

#[cfg(unix)]
fn run(mut cmd: Command, path: &Path) -> Result<i32, DispatchError> {
    use std::os::unix::process::CommandExt;

    // exec only returns on failure
    let source = cmd.exec();
    Err(DispatchError::Start {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(not(unix))]
fn run(mut cmd: Command, path: &Path) -> Result<i32, DispatchError> {
    let status = cmd.status().map_err(|source| DispatchError::Start {
        path: path.to_path_buf(),
        source,
    })?;

    status.code().ok_or(DispatchError::Terminated {
        path: path.to_path_buf(),
    })
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("ztc is not installed at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("{} is not an executable file", path.display())]
    NotExecutable { path: PathBuf },

    #[error("Failed to start {}: {source}", path.display())]
    Start {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[cfg(not(unix))]
    #[error("{} terminated without an exit code", path.display())]
    Terminated { path: PathBuf },
}

impl DispatchError {
    pub fn path(&self) -> &Path {
        match self {
            DispatchError::NotFound { path }
            | DispatchError::NotExecutable { path }
            | DispatchError::Start { path, .. } => path,
            #[cfg(not(unix))]
            DispatchError::Terminated { path } => path,
        }
    }

    /// Operator-facing refusal including the command line to run by hand.
    pub fn to_diagnostic(&self, command: LegacyCommand, args: &[OsString]) -> Diagnostic {
        let mut manual = format!("  {} {}", self.path().display(), command.subcommand());
        for arg in args {
            manual.push(' ');
            manual.push_str(&arg.to_string_lossy());
        }

        Diagnostic::refusal(
            format!("{} could not hand off to ztc: {}", command.legacy_name(), self),
            vec![
                String::new(),
                format!("Expected an executable ztc at {}.", self.path().display()),
                "Install the ztc package, or point ZTC_COMPAT_ZTC_PATH at the installed binary."
                    .to_string(),
                String::new(),
                "Translated invocation:".to_string(),
                manual,
            ],
        )
    }
}
