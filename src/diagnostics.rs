//! Human-readable diagnostics for operators.
//!
//! Diagnostics are written to stderr only; stdout belongs to `ztc` and may be
//! parsed by the caller. Rendering is deterministic for identical input so
//! the texts can be asserted in tests.

use std::io::{self, Write};

use colored::Colorize;

/// Tier of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Execution continues after the message.
    Warning,
    /// Execution stops with a non-zero exit.
    Refusal,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Refusal => "ERROR",
        }
    }
}

/// A single operator-facing message: one headline plus detail lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub headline: String,
    pub details: Vec<String>,
}

impl Diagnostic {
    pub fn warning(headline: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            severity: Severity::Warning,
            headline: headline.into(),
            details,
        }
    }

    pub fn refusal(headline: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            severity: Severity::Refusal,
            headline: headline.into(),
            details,
        }
    }

    /// Renders the diagnostic without color, one line per entry.
    pub fn render(&self) -> String {
        let mut text = format!("{}: {}\n", self.severity.label(), self.headline);
        for line in &self.details {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// Writes diagnostics to an error channel.
pub struct DiagnosticEmitter<W: Write> {
    out: W,
    no_color: bool,
}

impl DiagnosticEmitter<io::Stderr> {
    /// Creates an emitter bound to the process's stderr.
    pub fn stderr(no_color: bool) -> Self {
        Self::new(io::stderr(), no_color)
    }
}

impl<W: Write> DiagnosticEmitter<W> {
    pub fn new(out: W, no_color: bool) -> Self {
        Self { out, no_color }
    }

    /// Writes one diagnostic and flushes, so the text is out before any
    /// `exec` replaces the process.
    pub fn emit(&mut self, diagnostic: &Diagnostic) {
        let label = diagnostic.severity.label();
        let label = if self.no_color {
            label.to_string()
        } else {
            match diagnostic.severity {
                Severity::Warning => label.yellow().bold().to_string(),
                Severity::Refusal => label.red().bold().to_string(),
            }
        };

        writeln!(self.out, "{}: {}", label, diagnostic.headline).ok();
        for line in &diagnostic.details {
            writeln!(self.out, "{}", line).ok();
        }
        self.out.flush().ok();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
