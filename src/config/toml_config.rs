use crate::adapters::reader::DEFAULT_IMPORT_EXTENSIONS;
use crate::utils::error::{RosterError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default = "default_extensions")]
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_file_name() -> String {
    "persons.json".to_string()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_IMPORT_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_extensions(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl RosterConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| RosterError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with environment values; unknown ones stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RosterError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.import.allowed_extensions
    }

    pub fn log_level(&self) -> &str {
        &self.logging.level
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        validate_path("store.data_dir", &self.store.data_dir)?;
        validate_non_empty_string("store.file_name", &self.store.file_name)?;

        if self.import.allowed_extensions.is_empty() {
            return Err(RosterError::validation(
                "import.allowed_extensions",
                "At least one extension must be allowed",
            ));
        }
        for ext in &self.import.allowed_extensions {
            if !DEFAULT_IMPORT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
                return Err(RosterError::validation(
                    "import.allowed_extensions",
                    format!(
                        "Unsupported extension '{}'. Supported: {}",
                        ext,
                        DEFAULT_IMPORT_EXTENSIONS.join(", ")
                    ),
                ));
            }
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(RosterError::validation(
                "logging.level",
                format!("Unknown level '{}'", self.logging.level),
            ));
        }

        Ok(())
    }
}
