//! Energy chain CLI - generate energy chain rigs from the command line
//!
//! This binary validates chain parameters, computes bone offsets and builds
//! rigs around a box template in an in-memory scene.

use clap::Parser;
use std::process::ExitCode;

use energychain_cli::cli_args::{Cli, Commands};
use energychain_cli::commands;

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    // RUST_LOG, when set, takes precedence over the flag.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            params,
            template,
            out,
            json,
        } => commands::generate::run(&params, &template, out.as_deref(), json),
        Commands::Offsets {
            cursor_y,
            template,
            json,
        } => commands::offsets::run(cursor_y, &template, json),
        Commands::Validate {
            params,
            template,
            json,
        } => commands::validate::run(&params, &template, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
