//! Command-line surface of `quire`, declared with clap derive.
//!
//! Article fields are deliberately optional at this layer: a missing
//! `--title` is reported by the message factory together with every other
//! failing field, not by clap one flag at a time.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name    = "quire",
    bin_name = "quire",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Article service driven by a typed command/query bus",
    long_about = "Quire creates, reads, updates and deletes articles through a \
                  command bus and a query bus, and reports every failure as a \
                  list of status-coded problems.",
    after_help = "EXAMPLES:\n\
        \x20 quire create --title Hello --content 'First post'\n\
        \x20 quire --seed articles.json get 6f1c...\n\
        \x20 quire --seed articles.json list --format json\n\
        \x20 quire batch requests.jsonl",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Publish a new article.
    #[command(
        visible_alias = "new",
        about = "Create an article",
        after_help = "EXAMPLES:\n\
            \x20 quire create --title Hello --content 'First post'\n\
            \x20 quire create --title Hello --content Body --author author-7"
    )]
    Create(CreateArgs),

    /// Show one article.
    #[command(about = "Show an article")]
    Get(IdArgs),

    /// List every article.
    #[command(visible_alias = "ls", about = "List articles")]
    List(ListArgs),

    /// Replace the title and content of an article.
    #[command(about = "Update an article")]
    Update(UpdateArgs),

    /// Remove an article.
    #[command(visible_alias = "rm", about = "Delete an article")]
    Delete(IdArgs),

    /// Run a file of requests against one store.
    #[command(
        about = "Run JSON-lines requests in one process",
        after_help = "Each non-blank line is one request, for example:\n\
            \x20 {\"op\":\"create\",\"title\":\"Hello\",\"content\":\"Body\"}\n\
            \x20 {\"op\":\"get\",\"id\":\"6f1c...\"}\n\
            \x20 {\"op\":\"list\"}\n\n\
            Every request runs; failures are reported together afterwards."
    )]
    Batch(BatchArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 quire completions bash > ~/.local/share/bash-completion/completions/quire\n\
            \x20 quire completions zsh  > ~/.zfunc/_quire\n\
            \x20 quire completions fish > ~/.config/fish/completions/quire.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Quire configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 quire config get author.name\n\
            \x20 quire config list\n\
            \x20 quire config path"
    )]
    Config(ConfigCommands),
}

// ── article arguments ─────────────────────────────────────────────────────────

/// Arguments for `quire create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(short = 't', long = "title", help = "Article title")]
    pub title: Option<String>,

    #[arg(short = 'b', long = "content", help = "Article body")]
    pub content: Option<String>,

    /// Falls back to `author.id` from the configuration.
    #[arg(
        short = 'a',
        long = "author",
        value_name = "AUTHOR_ID",
        help = "Author id (default: author.id from config)"
    )]
    pub author: Option<String>,
}

/// Arguments for `quire update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(value_name = "ID", help = "Article id")]
    pub id: Option<String>,

    #[arg(short = 't', long = "title", help = "New title")]
    pub title: Option<String>,

    #[arg(short = 'b', long = "content", help = "New body")]
    pub content: Option<String>,
}

/// A single article id.
#[derive(Debug, Args)]
pub struct IdArgs {
    #[arg(value_name = "ID", help = "Article id")]
    pub id: Option<String>,
}

/// Arguments for `quire list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "How to print the articles"
    )]
    pub format: ListFormat,
}

/// Layout of `quire list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Id, author and title columns.
    Table,
    /// One id per line.
    Ids,
    /// The articles as a JSON array, oldest first.
    Json,
}

/// Arguments for `quire batch`.
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// JSON-lines file; `-` reads standard input.
    #[arg(value_name = "FILE", help = "Requests file (one JSON object per line)")]
    pub file: PathBuf,
}

/// Arguments for `quire completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to print a completion script for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Subcommands for `quire config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one dotted key, e.g. `author.name`.
    Get {
        /// Dotted key path, e.g. `author.name`.
        key: String,
    },
    /// Print the merged configuration.
    List,
    /// Print the path to the default configuration file.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn clap_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn create_fields_are_optional_at_parse_time() {
        let cli = Cli::parse_from(["quire", "create", "--title", "Hello"]);
        let Commands::Create(args) = cli.command else {
            panic!("expected Create command");
        };
        assert_eq!(args.title.as_deref(), Some("Hello"));
        assert!(args.content.is_none());
        assert!(args.author.is_none());
    }

    #[test]
    fn update_takes_id_and_fields() {
        let cli = Cli::parse_from(["quire", "update", "abc", "-t", "T", "-b", "B"]);
        let Commands::Update(args) = cli.command else {
            panic!("expected Update command");
        };
        assert_eq!(args.id.as_deref(), Some("abc"));
        assert_eq!(args.title.as_deref(), Some("T"));
        assert_eq!(args.content.as_deref(), Some("B"));
    }

    #[test]
    fn aliases_resolve() {
        assert!(matches!(
            Cli::parse_from(["quire", "ls"]).command,
            Commands::List(_)
        ));
        assert!(matches!(
            Cli::parse_from(["quire", "rm", "x"]).command,
            Commands::Delete(_)
        ));
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = Cli::parse_from(["quire", "get", "x", "--request-id", "r-1", "--seed", "s.json"]);
        assert_eq!(cli.global.request_id.as_deref(), Some("r-1"));
        assert_eq!(cli.global.seed, Some(PathBuf::from("s.json")));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["quire", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
