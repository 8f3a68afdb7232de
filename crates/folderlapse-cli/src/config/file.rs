use crate::cli::{ProfileChoice, PromptStyleChoice, ValidationChoice};
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePromptsConfig {
    pub profile: Option<ProfileChoice>,
    pub style: Option<PromptStyleChoice>,
    pub time_window: Option<bool>,
    pub validation: Option<ValidationChoice>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileDefaultsConfig {
    pub fps: Option<u32>,
    pub overwrite: Option<bool>,
    pub overlay: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileRendererConfig {
    pub script: Option<PathBuf>,
    pub requirements: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileEnvironmentConfig {
    pub python: Option<PathBuf>,
    pub venv_path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConsoleConfig {
    pub pause_on_exit: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub prompts: Option<FilePromptsConfig>,
    pub defaults: Option<FileDefaultsConfig>,
    pub renderer: Option<FileRendererConfig>,
    pub environment: Option<FileEnvironmentConfig>,
    pub console: Option<FileConsoleConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
