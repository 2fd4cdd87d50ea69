use std::ffi::OsString;

use clap::Parser;
use ztc_compat::{
    cli::Cli, config::Config, diagnostics::DiagnosticEmitter, dispatch::ZtcDispatcher,
    error::CompatError, exit_codes, logging::init_logging, shim, translate::LegacyCommand,
};

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => match err.downcast_ref::<CompatError>() {
            Some(error) => {
                eprint!("{}", error.report());
                error.exit_code()
            }
            None => {
                eprintln!("Error: {err:#}");
                exit_codes::CLI_ARGS
            }
        },
    };
    std::process::exit(code);
}

fn run() -> anyhow::Result<i32> {
    let mut argv: Vec<OsString> = std::env::args_os().collect();

    let entry_point = argv
        .first()
        .and_then(|program| LegacyCommand::from_program_name(program));

    let cli = match entry_point {
        Some(command) => {
            let legacy_args = argv.split_off(1);
            Cli::for_entry_point(command, legacy_args).map_err(CompatError::from)?
        }
        None => Cli::parse_from(argv),
    };

    init_logging(cli.options.verbose, cli.options.no_color);

    let config = Config::from_cli(cli)?;

    log::debug!("Configuration: {:?}", config);

    let dispatcher = ZtcDispatcher::new(config.ztc_path.clone());
    let mut emitter = DiagnosticEmitter::stderr(config.no_color);

    Ok(shim::run(&config.invocation, &dispatcher, &mut emitter))
}
