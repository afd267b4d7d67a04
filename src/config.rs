use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location probed when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./config/pnet.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Which row supplies the taxonomy block.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaxonomySource {
    /// First accepted row with a non-blank taxonomy field.
    #[default]
    FirstRow,
    /// First accepted row whose post number is 1.
    PostOne,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct InputConfig {
    #[serde(default)]
    pub taxonomy_source: TaxonomySource,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphConfig {
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_similarity_weight")]
    pub similarity_weight: f64,
    #[serde(default = "default_repair")]
    pub repair_disconnected: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            similarity_weight: default_similarity_weight(),
            repair_disconnected: default_repair(),
        }
    }
}

fn default_similarity_threshold() -> f64 {
    0.7
}
fn default_similarity_weight() -> f64 {
    0.5
}
fn default_repair() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_html")]
    pub html: String,
    #[serde(default = "default_svg")]
    pub svg: String,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            html: default_html(),
            svg: default_svg(),
            title: default_title(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./out")
}
fn default_html() -> String {
    "pattern_network.html".to_string()
}
fn default_svg() -> String {
    "pattern_network.svg".to_string()
}
fn default_title() -> String {
    "Fashion Pattern Modification Network".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Built-in defaults, used when no config file is present.
    pub fn minimal() -> Self {
        Self::default()
    }

    pub fn html_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.html)
    }

    pub fn svg_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.svg)
    }
}

/// Resolve the configuration for a run.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_PATH`] is used
/// when present, otherwise [`Config::minimal`].
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_config(default_path)
            } else {
                Ok(Config::minimal())
            }
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if !(0.0..=1.0).contains(&config.graph.similarity_threshold) {
        anyhow::bail!("graph.similarity_threshold must be in [0.0, 1.0]");
    }

    if config.graph.similarity_weight <= 0.0 || !config.graph.similarity_weight.is_finite() {
        anyhow::bail!("graph.similarity_weight must be > 0");
    }

    if config.output.html.trim().is_empty() || config.output.svg.trim().is_empty() {
        anyhow::bail!("output.html and output.svg must not be empty");
    }

    if config.log.level.parse::<tracing::Level>().is_err() {
        anyhow::bail!(
            "Unknown log level: '{}'. Must be trace, debug, info, warn, or error.",
            config.log.level
        );
    }

    Ok(())
}
