//! Single-pass execution of one legacy invocation.
//!
//! `Start -> Classify -> Refuse | Notice | Rewrite -> Dispatch`, with every
//! branch ending in exactly one exit code. Nothing is retried.

use std::ffi::OsString;
use std::io::Write;

use log::debug;

use crate::diagnostics::DiagnosticEmitter;
use crate::dispatch::Dispatcher;
use crate::exit_codes;
use crate::translate::{self, Invocation, LegacyCommand, Translation};

/// Translates and runs one invocation, returning the process exit code.
pub fn run<D, W>(invocation: &Invocation, dispatcher: &D, emitter: &mut DiagnosticEmitter<W>) -> i32
where
    D: Dispatcher,
    W: Write,
{
    match translate::translate(invocation) {
        Translation::Refuse(refusal) => {
            debug!("Refused with {:?}", refusal.kind);
            emitter.emit(&refusal.diagnostic);
            refusal.exit_code()
        }
        Translation::Notice(notice) => {
            emitter.emit(&notice);
            exit_codes::SUCCESS
        }
        Translation::Dispatch(args) => dispatch(invocation.command(), &args, dispatcher, emitter),
        Translation::WarnThenDispatch { args, warnings } => {
            for warning in &warnings {
                emitter.emit(warning);
            }
            dispatch(invocation.command(), &args, dispatcher, emitter)
        }
    }
}

fn dispatch<D, W>(
    command: LegacyCommand,
    args: &[OsString],
    dispatcher: &D,
    emitter: &mut DiagnosticEmitter<W>,
) -> i32
where
    D: Dispatcher,
    W: Write,
{
    debug!("Translated arguments: {} {:?}", command.subcommand(), args);

    match dispatcher.dispatch(command, args) {
        Ok(code) => code,
        Err(error) => {
            emitter.emit(&error.to_diagnostic(command, args));
            exit_codes::DISPATCH_FAILED
        }
    }
}
