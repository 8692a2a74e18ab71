//! Settings of the `quire` binary. The core crates never read them.
//!
//! Later sources win:
//!
//! 1. Built-in defaults
//! 2. Config file: `--config FILE` (must exist) or [`AppConfig::config_path`]
//!    (optional)
//! 3. Environment variables: `QUIRE_<SECTION>__<KEY>`, e.g.
//!    `QUIRE_AUTHOR__NAME=Ada`
//! 4. Command-line flags, applied by the callers

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix of every problem reference this binary produces.
pub const DEFAULT_INSTANCE_PREFIX: &str = "urn:quire:request:";

/// Settings merged from defaults, the TOML file and `QUIRE_*` variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub output: OutputConfig,
    /// Author returned by the author directory.
    pub author: AuthorConfig,
    /// Article store settings. Every key is optional, so the section may be
    /// absent from every source.
    #[serde(default)]
    pub store: StoreConfig,
    /// Problem rendering.
    pub problems: ProblemsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorConfig {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemsConfig {
    pub instance_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            author: AuthorConfig {
                id: "author-0".into(),
                name: "Jane Doe".into(),
            },
            store: StoreConfig::default(),
            problems: ProblemsConfig {
                instance_prefix: DEFAULT_INSTANCE_PREFIX.into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; an explicit
    /// file that does not exist is an error, the default location is not.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        Self::builder_with_defaults()?
            .add_source(toml_file(&path).required(required))
            .add_source(
                Environment::with_prefix("QUIRE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("configuration has an unexpected shape")
    }

    fn builder_with_defaults() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Self::default();
        Ok(Config::builder()
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format)?
            .set_default("author.id", defaults.author.id)?
            .set_default("author.name", defaults.author.name)?
            .set_default("problems.instance_prefix", defaults.problems.instance_prefix)?)
    }

    /// `config.toml` in the platform config directory, or `.quire.toml`
    /// when no home directory can be determined.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "quire", "quire")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".quire.toml"))
    }

    /// Look up a dotted key, as accepted by `quire config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            "author.id" => self.author.id.clone(),
            "author.name" => self.author.name.clone(),
            "store.seed_path" => self
                .store
                .seed_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "problems.instance_prefix" => self.problems.instance_prefix.clone(),
            _ => return None,
        };
        Some(value)
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}
