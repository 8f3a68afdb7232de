use folderlapse::engine::collaborators::PromptKey;
use folderlapse::engine::config::ResolverConfig;
use std::collections::HashMap;
use std::path::PathBuf;

pub struct RendererConfig {
    pub script: PathBuf,
    pub requirements: PathBuf,
}

pub struct EnvironmentConfig {
    pub python: Option<PathBuf>,
    pub venv_path: PathBuf,
}

pub struct AppConfig {
    pub resolver: ResolverConfig,
    pub folder: Option<PathBuf>,
    pub presets: HashMap<PromptKey, String>,
    pub renderer: RendererConfig,
    pub environment: EnvironmentConfig,
    pub dry_run: bool,
    pub pause_on_exit: bool,
}
