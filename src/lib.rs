//! Compatibility layer for the retired `fix.py`, `prepare.py` and `scan.py`
//! entry points.
//!
//! Each legacy invocation is translated into a `ztc` command line, or refused
//! with an explanation when no safe translation exists. Translation is pure
//! ([`translate`]); [`shim::run`] wires it to diagnostics and dispatch.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod shim;
pub mod translate;
