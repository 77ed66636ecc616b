use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config file not found at {config_path}")]
    ConfigNotFound { config_path: PathBuf },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Language '{language}' in {config_path} has an empty command")]
    EmptyCommand {
        config_path: PathBuf,
        language: String,
    },
}

/// Settings that apply to every snippet execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Wall-clock limit for a single snippet run.
    pub timeout_secs: u64,
}

impl ExecutionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

/// How to run the snippets of one language.
///
/// `command[0]` is the program, the rest are its arguments. An argument
/// containing `{path}` makes the snippet go through a temporary file instead
/// of standard input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub command: Vec<String>,
    /// Extension given to the temporary source file, e.g. `py`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl LanguageConfig {
    fn stdin(command: &[&str]) -> Self {
        Self {
            command: command.iter().map(|part| part.to_string()).collect(),
            extension: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub execution: ExecutionConfig,
    pub languages: BTreeMap<String, LanguageConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let mut languages = BTreeMap::new();
        languages.insert("python".to_string(), LanguageConfig::stdin(&["python3", "-"]));
        languages.insert("sh".to_string(), LanguageConfig::stdin(&["sh", "-s"]));
        Self {
            execution: ExecutionConfig::default(),
            languages,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        for (language, settings) in config.languages.iter_mut() {
            let Some(program) = settings.command.first_mut() else {
                return Err(ConfigError::EmptyCommand {
                    config_path: config_path.to_path_buf(),
                    language: language.clone(),
                });
            };
            // Interpreters are often installed under ~ or a virtualenv variable
            if let Some(expanded) = Self::expand_program(program) {
                *program = expanded;
            }
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the given file, which must exist, or the default location when
    /// `path` is `None`, falling back to built-in defaults if that is missing.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path)?.ok_or_else(|| ConfigError::ConfigNotFound {
                config_path: path.to_path_buf(),
            }),
            None => Ok(Self::load()?.unwrap_or_default()),
        }
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/diffdoc");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_program(program: &str) -> Option<String> {
        match shellexpand::full(program) {
            Ok(expanded) => Some(expanded.into_owned()),
            Err(_) => None,
        }
    }
}
