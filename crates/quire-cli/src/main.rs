//! `quire`: create, read, update and delete articles from the shell.
//!
//! Arguments are parsed before logging starts, so `--help` stays silent.
//! Configuration is loaded next; articles are only touched once a
//! [`Session`] has wired the buses. Any [`CliError`] ends in a rendered
//! problem list and one of the exit codes below.
//!
//! ## Exit codes
//!
//! | Code | Meaning                          |
//! |------|----------------------------------|
//! |  0   | Success                          |
//! |  1   | Internal / system error (500)    |
//! |  2   | User / input error (400)         |
//! |  3   | Article not found (404)          |
//! |  4   | Configuration or wiring error    |
//! |  5   | Multiple problems (418)          |

use std::{io::IsTerminal as _, process::ExitCode};

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::{LogSettings, init_logging},
    output::OutputManager,
    session::Session,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod session;

fn main() -> ExitCode {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version are "errors" that exit 0.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(LogSettings::from_args(&cli.global)) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(command = ?cli.command, "CLI started");

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e:#}");
            eprintln!("Error: {e:#}");
            return ExitCode::from(4);
        }
    };

    let output = OutputManager::new(&cli.global, &config);
    let verbose = cli.global.verbose > 0;

    match run(cli, &config, &output) {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, &output, verbose),
    }
}

/// Commands that never touch articles run without opening a session.
#[instrument(skip_all)]
fn run(cli: Cli, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let command = match cli.command {
        Commands::Completions(cmd) => return commands::completions::execute(cmd),
        Commands::Config(cmd) => return commands::config::execute(cmd, config, output),
        other => other,
    };

    let session = Session::open(&cli.global, config)?;
    match command {
        Commands::Create(args) => commands::create::execute(args, config, &session, output),
        Commands::Get(args) => commands::get::execute(args, &session, output),
        Commands::List(args) => commands::list::execute(args, &session, output),
        Commands::Update(args) => commands::update::execute(args, &session, output),
        Commands::Delete(args) => commands::delete::execute(args, &session, output),
        Commands::Batch(args) => commands::batch::execute(args, &session, output),
        Commands::Completions(_) | Commands::Config(_) => Ok(()),
    }
}

/// In JSON mode a problem report is written to stdout as the command's
/// result; everything else goes to stderr.
fn handle_error(err: CliError, output: &OutputManager, verbose: bool) -> ExitCode {
    err.log();

    if let Some(report) = err.report().filter(|_| output.is_json()) {
        if output.json(report).is_ok() {
            return ExitCode::from(err.exit_code());
        }
    }

    let color = output.supports_color() && std::io::stderr().is_terminal();
    eprint!("{}", err.render(verbose, color));

    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn version_and_author_come_from_the_manifest() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
        assert!(cmd.get_author().is_some());
    }

    #[test]
    fn help_is_not_an_error_exit() {
        let err = Cli::try_parse_from(["quire", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }
}
