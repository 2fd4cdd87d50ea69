//! Exit codes of the compatibility shim.
//!
//! These codes are part of the public contract: monitoring rules alert on
//! them. `ztc` itself only exits with 0 or 1, so the shim-specific codes
//! below never collide with a downstream status, which is passed through
//! verbatim.

/// Downstream succeeded, or the shim intentionally showed help.
pub const SUCCESS: i32 = 0;

/// The shim's own options or configuration were invalid.
pub const CLI_ARGS: i32 = 2;

/// A value-taking legacy flag was given without its value.
pub const MALFORMED_INVOCATION: i32 = 64;

/// The downstream tool is missing, not executable, or could not be started.
pub const DISPATCH_FAILED: i32 = 69;

/// The legacy calling convention cannot be translated safely.
pub const UNSUPPORTED_INVOCATION: i32 = 78;
