//! Integration tests for the ztc-compat CLI.
//!
//! `/bin/echo` and `/bin/false` stand in for ztc, so the translated command
//! line shows up on stdout and exit codes can be observed without a real
//! ztc installation.

#![allow(deprecated)] // cargo_bin is deprecated but works fine for standard builds

use assert_cmd::Command;
use predicates::prelude::*;

const ZTC_PATH_ENV: &str = "ZTC_COMPAT_ZTC_PATH";

/// Runs the binary in its explicit `ztc-compat <command> ...` form, with ztc
/// replaced by `/bin/echo`.
fn shim() -> Command {
    let mut cmd = Command::cargo_bin("ztc-compat").unwrap();
    cmd.env(ZTC_PATH_ENV, "/bin/echo").env("ZTC_COMPAT_NO_COLOR", "true");
    cmd
}

// ============================================================================
// Help and Version tests
// ============================================================================

#[test]
fn test_help_shows_all_options() {
    Command::cargo_bin("ztc-compat")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--no-color"))
        .stdout(predicate::str::contains("--ztc-path"))
        .stdout(predicate::str::contains("fix"))
        .stdout(predicate::str::contains("prepare"))
        .stdout(predicate::str::contains("scan"));
}

#[test]
fn test_version() {
    Command::cargo_bin("ztc-compat")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_command_fails() {
    Command::cargo_bin("ztc-compat")
        .unwrap()
        .assert()
        .code(2);
}

#[test]
fn test_relative_ztc_path_is_a_config_error() {
    shim()
        .env(ZTC_PATH_ENV, "ztc")
        .args(["scan", "-n"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("Error: Configuration error:"))
        .stderr(predicate::str::contains("must be absolute"));
}

// ============================================================================
// fix: always refused
// ============================================================================

#[test]
fn test_fix_legacy_action_is_refused() {
    shim()
        .args(["fix", "vulners.packages", "12345", "67890"])
        .assert()
        .code(78)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Legacy fix.py action format is not supported",
        ))
        .stderr(predicate::str::contains(
            "ztc fix --host-name <real-hostname> --dry-run",
        ))
        .stderr(predicate::str::contains(
            "ztc fix --host-name <real-hostname> --force",
        ))
        .stderr(predicate::str::contains(
            "Arguments received: vulners.packages 12345 67890",
        ));
}

#[test]
fn test_fix_without_arguments_is_refused() {
    shim()
        .arg("fix")
        .assert()
        .code(78)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Arguments received: (none)"));
}

#[test]
fn test_fix_is_refused_even_without_ztc_installed() {
    shim()
        .env(ZTC_PATH_ENV, "/nonexistent/ztc")
        .args(["fix", "--host-name", "web01"])
        .assert()
        .code(78);
}

// ============================================================================
// prepare
// ============================================================================

#[test]
fn test_prepare_without_arguments_shows_help_and_exits_zero() {
    shim()
        .arg("prepare")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "WARNING: prepare.py called with no arguments.",
        ))
        .stderr(predicate::str::contains("ztc prepare --all"));
}

#[test]
fn test_prepare_short_cluster_renames_v() {
    shim()
        .args(["prepare", "-uvtd"])
        .assert()
        .success()
        .stdout("prepare -uVtd\n");
}

#[test]
fn test_prepare_config_path_in_cluster_is_kept() {
    shim()
        .args(["prepare", "-vc", "/etc/ztc/vulners.yaml", "-c/etc/ztc/v.yaml", "-tv"])
        .assert()
        .success()
        .stdout("prepare -Vc /etc/ztc/vulners.yaml -c/etc/ztc/v.yaml -tV\n");
}

#[test]
fn test_prepare_cluster_missing_config_value_is_malformed() {
    shim()
        .args(["prepare", "-tc"])
        .assert()
        .code(64)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("-c requires a value."));
}

#[test]
fn test_prepare_long_flags_are_renamed() {
    shim()
        .args(["prepare", "--vhosts", "--template", "--force"])
        .assert()
        .success()
        .stdout("prepare --virtual-hosts --templates --force\n");
}

// ============================================================================
// scan
// ============================================================================

#[test]
fn test_scan_nopush_short_flag() {
    shim()
        .args(["scan", "-n"])
        .assert()
        .success()
        .stdout("scan --nopush\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_scan_limit_value_follows_flag() {
    shim()
        .args(["scan", "-l", "42"])
        .assert()
        .success()
        .stdout("scan --limit 42\n");
}

#[test]
fn test_scan_dump_is_approximated_with_warning() {
    shim()
        .args(["scan", "--dump"])
        .assert()
        .success()
        .stdout("scan --dry-run\n")
        .stderr(predicate::str::contains(
            "WARNING: --dump is approximated as --dry-run (no disk dump).",
        ));
}

#[test]
fn test_scan_limit_without_value_is_malformed() {
    shim()
        .args(["scan", "--limit"])
        .assert()
        .code(64)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--limit requires a value."));
}

#[test]
fn test_scan_without_arguments_runs_bare_scan() {
    shim().arg("scan").assert().success().stdout("scan\n");
}

#[test]
fn test_unknown_flags_pass_through() {
    shim()
        .args(["scan", "--hosts", "10084,10085", "--limit=5"])
        .assert()
        .success()
        .stdout("scan --hosts 10084,10085 --limit=5\n");
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_downstream_exit_code_is_passed_through() {
    shim()
        .env(ZTC_PATH_ENV, "/bin/false")
        .args(["scan", "-n"])
        .assert()
        .code(1);
}

#[test]
fn test_missing_ztc_is_a_dispatch_error() {
    shim()
        .env(ZTC_PATH_ENV, "/nonexistent/ztc")
        .args(["scan", "-n"])
        .assert()
        .code(69)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ztc is not installed at /nonexistent/ztc"))
        .stderr(predicate::str::contains("/nonexistent/ztc scan --nopush"));
}

#[test]
fn test_ztc_path_flag_overrides_environment() {
    shim()
        .env(ZTC_PATH_ENV, "/nonexistent/ztc")
        .args(["--ztc-path", "/bin/echo", "scan", "-n"])
        .assert()
        .success()
        .stdout("scan --nopush\n");
}

// ============================================================================
// Multi-call: invoked under a legacy script name
// ============================================================================

#[cfg(unix)]
mod entry_points {
    use super::*;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    /// Links the binary under a legacy script name inside a temp directory.
    fn legacy_entry_point(name: &str) -> (TempDir, Command) {
        let temp_dir = TempDir::new().unwrap();
        let link = temp_dir.path().join(name);
        symlink(assert_cmd::cargo::cargo_bin("ztc-compat"), &link).unwrap();

        let mut cmd = Command::new(&link);
        cmd.env(ZTC_PATH_ENV, "/bin/echo")
            .env("ZTC_COMPAT_NO_COLOR", "true");
        (temp_dir, cmd)
    }

    #[test]
    fn test_scan_py_translates_all_arguments() {
        let (_temp_dir, mut cmd) = legacy_entry_point("scan.py");
        cmd.args(["-n", "-d", "-l", "5"])
            .assert()
            .success()
            .stdout("scan --nopush --dry-run --limit 5\n")
            .stderr(predicate::str::contains("approximated as --dry-run"));
    }

    #[test]
    fn test_prepare_py_cluster() {
        let (_temp_dir, mut cmd) = legacy_entry_point("prepare.py");
        cmd.arg("-uvtd").assert().success().stdout("prepare -uVtd\n");
    }

    #[test]
    fn test_invalid_environment_option_is_reported_by_clap() {
        let (_temp_dir, mut cmd) = legacy_entry_point("scan.py");
        cmd.env("ZTC_COMPAT_VERBOSE", "maybe")
            .arg("-n")
            .assert()
            .code(2)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::starts_with("error: invalid value 'maybe'"))
            .stderr(predicate::str::contains("Error: error:").not());
    }

    #[test]
    fn test_prepare_py_without_arguments() {
        let (_temp_dir, mut cmd) = legacy_entry_point("prepare.py");
        cmd.assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("no changes made"));
    }

    #[test]
    fn test_fix_py_refuses_zabbix_macros() {
        let (_temp_dir, mut cmd) = legacy_entry_point("fix.py");
        cmd.args(["vulners.packages", "{TRIGGER.ID}", "{EVENT.ID}"])
            .assert()
            .code(78)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains(
                "Arguments received: vulners.packages {TRIGGER.ID} {EVENT.ID}",
            ));
    }

    #[test]
    fn test_legacy_help_flag_reaches_ztc() {
        let (_temp_dir, mut cmd) = legacy_entry_point("scan.py");
        cmd.arg("--help").assert().success().stdout("scan --help\n");
    }
}
