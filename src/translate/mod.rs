//! Translation of legacy script invocations into ztc argument lists.
//!
//! Everything in here is a pure function of the received arguments: no I/O,
//! no process state. The caller decides what to do with the resulting
//! [`Translation`].

pub mod refusal;
pub mod rewriter;
pub mod table;

pub use refusal::{Refusal, RefusalKind};
pub use rewriter::{FlagRewriter, Rewritten};
pub use table::{CommandTable, FlagClass, FlagMapping};

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

use log::debug;

use crate::diagnostics::Diagnostic;

/// One of the three historical entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum LegacyCommand {
    Fix,
    Prepare,
    Scan,
}

impl LegacyCommand {
    /// The ztc subcommand doing the real work.
    pub fn subcommand(self) -> &'static str {
        match self {
            LegacyCommand::Fix => "fix",
            LegacyCommand::Prepare => "prepare",
            LegacyCommand::Scan => "scan",
        }
    }

    /// File name the legacy script was installed under.
    pub fn legacy_name(self) -> &'static str {
        match self {
            LegacyCommand::Fix => "fix.py",
            LegacyCommand::Prepare => "prepare.py",
            LegacyCommand::Scan => "scan.py",
        }
    }

    /// The legacy contract passed `{HOST.HOST} {TRIGGER.ID} {EVENT.ID}` and
    /// derived the real target from them.
    pub fn relies_on_positional_context(self) -> bool {
        matches!(self, LegacyCommand::Fix)
    }

    /// Resolves the entry point from the file name in argv[0], accepting
    /// both `scan.py` and a bare `scan`.
    pub fn from_program_name(program: &OsStr) -> Option<Self> {
        let name = Path::new(program).file_name()?.to_str()?;
        let stem = name.strip_suffix(".py").unwrap_or(name);
        match stem {
            "fix" => Some(LegacyCommand::Fix),
            "prepare" => Some(LegacyCommand::Prepare),
            "scan" => Some(LegacyCommand::Scan),
            _ => None,
        }
    }
}

impl fmt::Display for LegacyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.legacy_name())
    }
}

/// A legacy command name and its arguments exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    command: LegacyCommand,
    args: Vec<OsString>,
}

impl Invocation {
    pub fn new(command: LegacyCommand, args: Vec<OsString>) -> Self {
        Self { command, args }
    }

    pub fn command(&self) -> LegacyCommand {
        self.command
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

/// Calling convention detected for an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgClass<'a> {
    NoArgs,
    PositionalUnsupported,
    FlagStyle(&'a [OsString]),
}

/// Classifies the calling convention of an invocation.
pub fn classify(invocation: &Invocation) -> ArgClass<'_> {
    if invocation.args.is_empty() {
        ArgClass::NoArgs
    } else if invocation.command.relies_on_positional_context() {
        ArgClass::PositionalUnsupported
    } else {
        ArgClass::FlagStyle(&invocation.args)
    }
}

/// Outcome of translating one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Run ztc with these arguments.
    Dispatch(Vec<OsString>),
    /// Emit the warnings, then run ztc with these arguments.
    WarnThenDispatch {
        args: Vec<OsString>,
        warnings: Vec<Diagnostic>,
    },
    /// Emit the notice and exit successfully without running ztc.
    Notice(Diagnostic),
    /// Emit the refusal and exit with its code without running ztc.
    Refuse(Refusal),
}

/// Translates one legacy invocation.
pub fn translate(invocation: &Invocation) -> Translation {
    let command = invocation.command;
    let class = classify(invocation);
    debug!("{} invocation classified as {:?}", command, class);

    match class {
        ArgClass::NoArgs => match command {
            LegacyCommand::Fix => {
                Translation::Refuse(refusal::positional_unsupported(command, &invocation.args))
            }
            LegacyCommand::Prepare => Translation::Notice(refusal::prepare_without_arguments()),
            LegacyCommand::Scan => Translation::Dispatch(Vec::new()),
        },
        ArgClass::PositionalUnsupported => {
            Translation::Refuse(refusal::positional_unsupported(command, &invocation.args))
        }
        ArgClass::FlagStyle(tokens) => {
            let Some(table) = CommandTable::for_command(command) else {
                return Translation::Refuse(refusal::positional_unsupported(command, tokens));
            };

            match FlagRewriter::new(table).rewrite(tokens) {
                Ok(Rewritten { args, warnings }) if warnings.is_empty() => {
                    Translation::Dispatch(args)
                }
                Ok(Rewritten { args, warnings }) => Translation::WarnThenDispatch { args, warnings },
                Err(refusal) => Translation::Refuse(refusal),
            }
        }
    }
}
