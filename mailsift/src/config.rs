use config::{Config, ConfigError, Environment, File};
use extractors::ExtractorSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct MailsiftConfig {
    pub extractor: ExtractorSettings,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub separator: String,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            separator: "\n".to_string(),
            format: OutputFormat::Text,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

const DEFAULT_CONFIG: &str = r#"
[extractor]
# Extensions to leave out of the dispatch table, e.g. ["rar", "7z"]
disabled_formats = []
# Replace invalid UTF-8 in plain-text files instead of reporting them
lossy_text = true

[output]
separator = "\n"
# "text" or "json"
format = "text"

[logging]
# Overridden by RUST_LOG
level = "info"
"#;

impl MailsiftConfig {
    /// Load from `path`, or from the default location (created on first run),
    /// then apply `MAILSIFT__SECTION__KEY` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let config_path = get_config_path();
                write_default_config(&config_path)?;
                config_path
            }
        };

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .add_source(
                Environment::with_prefix("MAILSIFT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: MailsiftConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }
}

fn write_default_config(config_path: &Path) -> Result<(), ConfigError> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Message(format!("Failed to create config directory: {e}"))
        })?;
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .map_err(|e| ConfigError::Message(format!("Failed to write default config: {e}")))
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("mailsift").join("config.toml")
    } else {
        PathBuf::from("mailsift.toml")
    }
}
