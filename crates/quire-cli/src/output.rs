//! Everything written to stdout goes through [`OutputManager`].

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use quire_core::domain::Article;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Leading symbol of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Success,
    Failure,
    Info,
}

impl Mark {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Failure => "\u{2717}",
            Self::Info => "\u{2139}",
        }
    }
}

/// Writes command results to stdout in the resolved format.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// `--output-format` wins over `output.format`; a remaining `Auto`
    /// becomes Human on a TTY and Plain otherwise. Colour is only used for
    /// Human output.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// A plain line; dropped under `--quiet`.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.mark(Mark::Success, msg)
    }

    /// Always written, even under `--quiet`.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.mark(Mark::Failure, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.mark(Mark::Info, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.no_color {
            self.print(text)
        } else {
            self.print(&text.cyan().bold().to_string())
        }
    }

    fn mark(&self, mark: Mark, msg: &str) -> io::Result<()> {
        if self.quiet && mark != Mark::Failure {
            return Ok(());
        }
        let symbol = mark.symbol();
        let line = match (self.no_color, mark) {
            (true, _) => format!("{symbol} {msg}"),
            (false, Mark::Success) => format!("{} {}", symbol.green().bold(), msg.green()),
            (false, Mark::Failure) => format!("{} {}", symbol.red().bold(), msg.red()),
            (false, Mark::Info) => format!("{} {}", symbol.blue().bold(), msg),
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout.  Written even in quiet mode: it is the
    /// command's result, not commentary.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&rendered)
    }

    /// One article: JSON, or a short human-readable card.
    pub fn article(&self, article: &Article) -> io::Result<()> {
        if self.is_json() {
            return self.json(article);
        }
        self.header(&article.title)?;
        self.print(&format!("  id:      {}", article.id))?;
        self.print(&format!("  author:  {}", article.author))?;
        self.print(&format!(
            "  created: {}",
            article.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ))?;
        if let Some(updated) = article.updated_at {
            self.print(&format!(
                "  updated: {}",
                updated.format("%Y-%m-%d %H:%M:%S UTC")
            ))?;
        }
        self.print("")?;
        self.print(&article.content)
    }

    /// One summary line per article.
    pub fn article_row(&self, article: &Article) -> io::Result<()> {
        let id = article.id.to_string();
        let line = if self.no_color {
            format!("  {id}  {}  ({})", article.title, article.author.name)
        } else {
            format!(
                "  {}  {}  {}",
                id.dimmed(),
                article.title.bold(),
                format!("({})", article.author.name).dimmed()
            )
        };
        self.print(&line)
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// Never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::AppConfig;

    fn make_manager(quiet: bool, format: OutputFormat, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
            seed: None,
            request_id: None,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_writes_are_still_ok() {
        let out = make_manager(true, OutputFormat::Plain, true);
        assert!(out.print("hello").is_ok());
        assert!(out.error("something went wrong").is_ok());
    }

    #[test]
    fn marks_have_distinct_symbols() {
        assert_ne!(Mark::Success.symbol(), Mark::Failure.symbol());
        assert_ne!(Mark::Info.symbol(), Mark::Failure.symbol());
    }

    #[test]
    fn color_only_for_human_output() {
        assert!(make_manager(false, OutputFormat::Human, false).supports_color());
        assert!(!make_manager(false, OutputFormat::Human, true).supports_color());
        assert!(!make_manager(false, OutputFormat::Plain, false).supports_color());
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
            seed: None,
            request_id: None,
        };
        let mut config = AppConfig::default();
        config.output.format = "json".into();

        assert!(OutputManager::new(&args, &config).is_json());
    }

    #[test]
    fn explicit_flag_beats_config() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
            seed: None,
            request_id: None,
        };
        assert_eq!(OutputManager::new(&args, &config).format(), OutputFormat::Plain);
    }
}
