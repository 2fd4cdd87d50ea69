//! Refusals and the fixed operator texts that go with them.

use std::ffi::OsString;

use super::LegacyCommand;
use crate::diagnostics::Diagnostic;
use crate::exit_codes;

/// Why an invocation was not dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalKind {
    /// The legacy calling convention cannot be translated safely.
    UnsupportedInvocation,
    /// A value-taking flag is missing its value.
    MalformedInvocation,
}

impl RefusalKind {
    pub fn exit_code(self) -> i32 {
        match self {
            RefusalKind::UnsupportedInvocation => exit_codes::UNSUPPORTED_INVOCATION,
            RefusalKind::MalformedInvocation => exit_codes::MALFORMED_INVOCATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refusal {
    pub kind: RefusalKind,
    pub diagnostic: Diagnostic,
}

impl Refusal {
    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }
}

/// Renders received arguments for the echo line.
pub fn echo_arguments(args: &[OsString]) -> String {
    if args.is_empty() {
        return "(none)".to_string();
    }

    args.iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Refusal for the positional `fix.py {HOST.HOST} {TRIGGER.ID} {EVENT.ID}`
/// contract. `{HOST.HOST}` resolves to a virtual host with a loopback
/// interface, so running remediation against it would hit the wrong machine.
pub fn positional_unsupported(command: LegacyCommand, args: &[OsString]) -> Refusal {
    let entry = command.legacy_name();
    let sub = command.subcommand();

    Refusal {
        kind: RefusalKind::UnsupportedInvocation,
        diagnostic: Diagnostic::refusal(
            format!("Legacy {entry} action format is not supported by ztc."),
            vec![
                String::new(),
                format!("The legacy {entry} derived target hosts from trigger/event context"),
                "and checked TrustedZabbixUsers. ztc does not implement these features."
                    .to_string(),
                String::new(),
                "IMPORTANT: {HOST.HOST} resolves to a virtual host (e.g. vulners.packages),"
                    .to_string(),
                format!("NOT the actual target machine. Do NOT pass it to ztc {sub}."),
                String::new(),
                "To fix a specific host, run:".to_string(),
                format!("  ztc {sub} --host-name <real-hostname> --dry-run   # preview"),
                format!("  ztc {sub} --host-name <real-hostname> --force      # execute"),
                String::new(),
                format!("Arguments received: {}", echo_arguments(args)),
            ],
        ),
    }
}

/// Legacy `prepare.py` without arguments showed help and changed nothing,
/// while `ztc prepare` without flags creates everything.
pub fn prepare_without_arguments() -> Diagnostic {
    Diagnostic::warning(
        "prepare.py called with no arguments.",
        vec![
            "Legacy behavior: show help and exit (no changes made).".to_string(),
            String::new(),
            "To create all Zabbix objects, run:".to_string(),
            "  ztc prepare --all".to_string(),
            "  ztc prepare --all --force   # after upgrade from the legacy scripts".to_string(),
            String::new(),
            "Available flags:".to_string(),
            "  -u  check utility paths (no-op in ztc)".to_string(),
            "  -v  create virtual hosts".to_string(),
            "  -t  create/update templates".to_string(),
            "  -d  create dashboard".to_string(),
        ],
    )
}

/// Refusal for a legacy flag whose behavior ztc cannot reproduce safely.
pub fn unsupported_flag(command: LegacyCommand, legacy_flag: &str, args: &[OsString]) -> Refusal {
    Refusal {
        kind: RefusalKind::UnsupportedInvocation,
        diagnostic: Diagnostic::refusal(
            format!(
                "{legacy_flag} has no safe ztc equivalent; {} was not run.",
                command.legacy_name()
            ),
            vec![
                String::new(),
                "See the available options with:".to_string(),
                format!("  ztc {} --help", command.subcommand()),
                String::new(),
                format!("Arguments received: {}", echo_arguments(args)),
            ],
        ),
    }
}

/// Refusal for a value-taking flag at the end of the argument list.
pub fn missing_value(
    command: LegacyCommand,
    legacy_flag: &str,
    translated_flag: &str,
    args: &[OsString],
) -> Refusal {
    Refusal {
        kind: RefusalKind::MalformedInvocation,
        diagnostic: Diagnostic::refusal(
            format!("{legacy_flag} requires a value."),
            vec![
                String::new(),
                format!(
                    "{} expects the value as the next argument, for example:",
                    command.legacy_name()
                ),
                format!("  {} {legacy_flag} <value>", command.legacy_name()),
                String::new(),
                "Equivalent ztc invocation:".to_string(),
                format!("  ztc {} {translated_flag} <value>", command.subcommand()),
                String::new(),
                format!("Arguments received: {}", echo_arguments(args)),
            ],
        ),
    }
}
