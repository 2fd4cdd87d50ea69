use colored::control::set_override;
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Installs the shim's logger. Records always go to stderr: on Unix the shim
/// becomes ztc, and stdout belongs to ztc from the first byte.
pub fn init_logging(verbose: bool, no_color: bool) {
    // Also covers diagnostics, which are colored through `colored`
    if no_color {
        set_override(false);
    }

    builder(verbose).init();
}

/// Shim records at the requested level; dependencies only when they warn.
fn builder(verbose: bool) -> Builder {
    let mut builder = Builder::new();
    builder
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), level_filter(verbose))
        .format_timestamp(None)
        .format_target(false);
    builder
}

fn level_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    // The logger can only be installed once per process, so the tests build
    // loggers without installing them.

    fn enabled(verbose: bool, level: Level, target: &str) -> bool {
        let logger = builder(verbose).build();
        logger.enabled(&Metadata::builder().level(level).target(target).build())
    }

    #[test]
    fn verbose_selects_debug() {
        assert_eq!(level_filter(true), LevelFilter::Debug);
        assert!(enabled(true, Level::Debug, "ztc_compat::translate::rewriter"));
    }

    #[test]
    fn default_is_info() {
        assert_eq!(level_filter(false), LevelFilter::Info);
        assert!(enabled(false, Level::Info, "ztc_compat::shim"));
        assert!(!enabled(false, Level::Debug, "ztc_compat::shim"));
    }

    #[test]
    fn dependencies_only_log_warnings() {
        assert!(!enabled(true, Level::Debug, "clap_builder"));
        assert!(!enabled(true, Level::Info, "clap_builder"));
        assert!(enabled(true, Level::Warn, "clap_builder"));
    }
}
