//! CLI-level errors, their suggestions and exit codes.
//!
//! Domain failures arrive already mapped to a [`ProblemReport`]; the CLI
//! only decides how to print them and which exit code to use.

use std::{error::Error, fmt::Write as _, io};

use owo_colors::OwoColorize;
use thiserror::Error;

use quire_core::{
    application::{DispatchError, RegistrationError},
    problem::{ProblemReport, ProblemStatus},
};

pub type CliResult<T> = Result<T, CliError>;

/// Everything a subcommand can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    /// A request failed; the report carries every problem.
    #[error("{}", .0.status)]
    Problems(ProblemReport),

    /// A message reached a bus with no handler for it.
    #[error("Bus misconfigured: {0}")]
    Dispatch(DispatchError),

    /// Two handlers claimed the same message type at start-up.
    #[error("Bus wiring failed: {0}")]
    Registration(#[from] RegistrationError),

    /// A batch line is not a valid request.
    #[error("Invalid request on line {line}")]
    InvalidBatchLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A configuration value could not be read or rendered.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error("I/O error while {action}")]
    Io {
        action: String,
        #[source]
        source: io::Error,
    },
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        Self::Io {
            action: "writing output".into(),
            source,
        }
    }
}

impl CliError {
    /// Hints printed under the error, most useful first.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Problems(report) => match report.status {
                ProblemStatus::BadRequest => vec![
                    "Check the values passed for the fields named above".into(),
                    "Article ids are UUIDs, as printed by 'quire create' or 'quire list --format ids'"
                        .into(),
                ],
                ProblemStatus::NotFound => vec![
                    "List existing articles: quire list".into(),
                    "Articles live in memory; preload some with --seed FILE".into(),
                ],
                ProblemStatus::MultipleProblems => {
                    vec!["Each problem above is reported with its own status".into()]
                }
                ProblemStatus::InternalServerError => vec![
                    "Re-run with -vv to see the underlying cause in the log".into(),
                ],
            },

            Self::Dispatch(_) | Self::Registration(_) => vec![
                "This is a wiring defect in the binary, not a problem with your input".into(),
                "Please report it together with the output of 'quire --version'".into(),
            ],

            Self::InvalidBatchLine { line, .. } => vec![
                format!("Line {line} must be one JSON object with an \"op\" field"),
                "Valid ops: create, update, delete, get, list".into(),
                "Example: {\"op\":\"get\",\"id\":\"<uuid>\"}".into(),
            ],

            Self::Config { .. } => vec![
                "Show the default config location: quire config path".into(),
                "Show the effective configuration: quire config list".into(),
            ],

            Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                vec!["Check the path; use '-' to read requests from stdin".into()]
            }
            Self::Io { .. } => vec!["Check that the file exists and is readable".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Problems(report) => match report.status {
                ProblemStatus::BadRequest => ErrorCategory::UserError,
                ProblemStatus::NotFound => ErrorCategory::NotFound,
                ProblemStatus::MultipleProblems => ErrorCategory::Multiple,
                ProblemStatus::InternalServerError => ErrorCategory::Internal,
            },
            Self::Dispatch(_) | Self::Registration(_) | Self::Config { .. } => {
                ErrorCategory::Configuration
            }
            Self::InvalidBatchLine { .. } => ErrorCategory::UserError,
            Self::Io { .. } => ErrorCategory::Internal,
        }
    }

    /// | Category          | Code |
    /// |-------------------|------|
    /// | Internal          |  1   |
    /// | User error        |  2   |
    /// | Not found         |  3   |
    /// | Configuration     |  4   |
    /// | Multiple problems |  5   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Multiple => 5,
        }
    }

    /// The problem report, if this error carries one.
    pub fn report(&self) -> Option<&ProblemReport> {
        match self {
            Self::Problems(report) => Some(report),
            _ => None,
        }
    }

    /// Multi-line message for stderr, with ANSI styling when `color` is set.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_owned() }
        };
        let mut out = String::new();

        let _ = writeln!(
            out,
            "\n{} {}",
            paint("Error:", |t| t.red().bold().to_string()),
            paint(&self.to_string(), |t| t.red().to_string()),
        );

        for problem in self.report().map(|r| r.problems.as_slice()).unwrap_or_default() {
            let code = format!("[{}]", problem.status.code());
            let _ = writeln!(
                out,
                "  {} {}",
                paint(&code, |t| t.yellow().to_string()),
                problem.detail
            );
            if let Some(instance) = &problem.instance {
                let _ = writeln!(out, "      {}", paint(instance, |t| t.dimmed().to_string()));
            }
        }

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(
                    out,
                    "  Caused by: {}",
                    paint(&err.to_string(), |t| t.dimmed().to_string())
                );
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Suggestions:", |t| t.yellow().bold().to_string())
            );
            for suggestion in &suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Use -v / --verbose for more details.", |t| t.dimmed().to_string())
            );
        }

        out
    }

    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, code = self.exit_code(), "{self}")
            }
            _ => tracing::warn!(?category, code = self.exit_code(), "{self}"),
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "underlying cause");
        }
    }
}

/// Coarse grouping that picks the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, malformed id, bad batch line).
    UserError,
    /// Article not found.
    NotFound,
    /// Several problems reported together.
    Multiple,
    /// Configuration or wiring error.
    Configuration,
    /// Anything the user cannot fix by changing input.
    Internal,
}

/// Attaches what was being attempted to an I/O failure.
pub trait IoContext<T> {
    fn while_doing(self, action: impl FnOnce() -> String) -> CliResult<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn while_doing(self, action: impl FnOnce() -> String) -> CliResult<T> {
        self.map_err(|source| CliError::Io {
            action: action(),
            source,
        })
    }
}
