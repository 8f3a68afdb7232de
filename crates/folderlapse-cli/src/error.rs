use folderlapse::engine::error::EngineError;
use folderlapse::engine::session::FAILURE_STATUS;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("No usable Python interpreter found: {0}")]
    InterpreterNotFound(String),

    #[error("Environment setup failed: {0}")]
    EnvironmentProvisioning(String),

    #[error("Renderer script not found at '{}'", .0.display())]
    CompanionScriptMissing(PathBuf),

    #[error("Renderer exited with status {code}")]
    RendererFailure { code: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// Renderer failures keep the renderer's own status; everything else is a
    /// precondition failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::RendererFailure { code } => *code,
            _ => FAILURE_STATUS,
        }
    }
}
