use rnsconf_core::schema::InterfaceCapabilities;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load capabilities from {path}: {source}")]
    Capabilities {
        path: String,
        source: rnsconf_core::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings for the `rnsconf` command.
/// Supported sources(in order of precedence):
/// - CLI arguments(by clap)
/// - Environment variables(by clap)
/// - Settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Runtime capability descriptor (JSON) used to gate interface types
    pub capabilities: Option<PathBuf>,

    pub output: OutputFormat,

    /// Treat validation warnings as failures
    pub deny_warnings: bool,
}

impl Settings {
    /// Reads a settings file; a missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn initialize(
        path: &Path,
        capabilities: Option<PathBuf>,
        output: Option<OutputFormat>,
    ) -> ConfigResult<Self> {
        let mut settings = Self::load(path)?;
        if let Some(capabilities) = capabilities {
            settings.capabilities = Some(capabilities);
        }
        if let Some(output) = output {
            settings.output = output;
        }
        Ok(settings)
    }

    pub fn load_capabilities(&self) -> ConfigResult<Option<InterfaceCapabilities>> {
        let Some(path) = &self.capabilities else {
            return Ok(None);
        };
        rnsconf_core::config::load_capabilities(path)
            .map(Some)
            .map_err(|source| ConfigError::Capabilities {
                path: path.display().to_string(),
                source,
            })
    }
}
