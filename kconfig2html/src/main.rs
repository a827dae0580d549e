use std::process;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use env_logger::Env;
use kconfig2html::{
    cli::Cli,
    ctx::AppContext,
    exit::{AppError, ExitCode},
};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = ExitCode::from_usage(err.kind());
            let _ = err.print();
            process::exit(code.code());
        }
    };

    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("{}", format!("ERROR: {err}").red());
        if err.is_usage() {
            eprintln!("\n{}", Cli::command().render_usage());
        }
        process::exit(err.exit_code().code());
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    AppContext::from_cli(cli)?.generate()
}
