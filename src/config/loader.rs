use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, ToolConfig};
use crate::config::{CONFIG_PATH_VAR, DEVELOPER_DIR_VAR, SDKROOT_VAR};

/// Errors that can occur when building the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set.")]
    MissingVar(&'static str),

    #[error("{name} is not valid UTF-8: {value:?}")]
    NotUnicode { name: &'static str, value: OsString },

    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// - `DEVELOPER_DIR` and `SDKROOT` must both be present and UTF-8.
    /// - If `LIBTOOL_WRAPPER_CONFIG` is present, the named TOML file is
    ///   loaded; otherwise `ToolConfig::default()` is used.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let developer_dir = required_var(&lookup, DEVELOPER_DIR_VAR)?;
        let sdk_root = required_var(&lookup, SDKROOT_VAR)?;

        let tool = match lookup(CONFIG_PATH_VAR) {
            Some(path) => ToolConfig::load(Path::new(&path))?,
            None => ToolConfig::default(),
        };

        Ok(Self {
            developer_dir,
            sdk_root,
            tool,
        })
    }
}

fn required_var<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(name)
        .ok_or(ConfigError::MissingVar(name))?
        .into_string()
        .map_err(|value| ConfigError::NotUnicode { name, value })
}

impl ToolConfig {
    /// Loads tool settings from a TOML file and validates them.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ToolConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the tool settings.
    ///
    /// Checks:
    /// - The archiver command names a program
    /// - No suppressed diagnostic is empty (it would match every line)
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.archiver.first() {
            Some(program) if !program.is_empty() => {}
            _ => {
                return Err(ConfigError::ValidationError {
                    message: "archiver must name a program".to_string(),
                });
            }
        }

        if self.suppressed_diagnostics.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::ValidationError {
                message: "suppressed_diagnostics entries must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
