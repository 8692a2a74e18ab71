//! Tracing subscriber set-up for the `quire` binary.
//!
//! The library crates only emit events; this is the one place a subscriber
//! is installed. Everything goes to stderr so that stdout stays reserved for
//! command results (and is machine-readable under `--output-format json`).
//!
//! | Flags     | Level |
//! |-----------|-------|
//! | none      | WARN  |
//! | `-v`      | INFO  |
//! | `-vv`     | DEBUG |
//! | `-vvv`    | TRACE |
//! | `--quiet` | ERROR |
//!
//! A set `RUST_LOG` replaces the flag-derived filter entirely.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events are shown when `RUST_LOG` is unset.
const OWN_TARGETS: [&str; 3] = ["quire", "quire_core", "quire_adapters"];

/// Resolved logging options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub ansi: bool,
    pub json: bool,
}

impl LogSettings {
    pub fn from_args(args: &GlobalArgs) -> Self {
        Self {
            level: level_for(args.verbose, args.quiet),
            ansi: !args.no_color && std::io::stderr().is_terminal(),
            json: args.output_format == OutputFormat::Json,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directives: Vec<String> = OWN_TARGETS
                .iter()
                .map(|target| format!("{target}={}", self.level))
                .collect();
            EnvFilter::new(directives.join(","))
        })
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(settings: LogSettings) -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(settings.ansi);

    let registry = tracing_subscriber::registry().with(settings.filter());
    let installed = if settings.json {
        registry.with(fmt_layer.json()).try_init()
    } else {
        registry.with(fmt_layer.compact()).try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_steps_up_from_warn() {
        let levels: Vec<_> = (0..=4).map(|v| level_for(v, false)).collect();
        assert_eq!(
            levels,
            vec![
                LevelFilter::WARN,
                LevelFilter::INFO,
                LevelFilter::DEBUG,
                LevelFilter::TRACE,
                LevelFilter::TRACE,
            ]
        );
    }

    #[test]
    fn quiet_wins() {
        assert_eq!(level_for(0, true), LevelFilter::ERROR);
        assert_eq!(level_for(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn json_output_switches_log_format() {
        let args = GlobalArgs {
            verbose: 1,
            quiet: false,
            no_color: true,
            config: None,
            output_format: OutputFormat::Json,
            seed: None,
            request_id: None,
        };
        let settings = LogSettings::from_args(&args);
        assert!(settings.json);
        assert!(!settings.ansi);
        assert_eq!(settings.level, LevelFilter::INFO);
    }
}
