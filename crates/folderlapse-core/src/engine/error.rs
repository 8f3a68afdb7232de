use thiserror::Error;

use super::collaborators::CollaboratorError;
use super::config::ConfigError;
use super::session::SessionState;
use crate::core::models::params::ParameterError;
use crate::core::validation::ValidationError;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Cannot access folder '{path}': {source}", path = path.display())]
    PathAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read answer from console: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("Folder picker failed: {0}")]
    FolderPicker(#[source] CollaboratorError),

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidInput {
        field: &'static str,
        value: String,
        #[source]
        reason: ValidationError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parameters(#[from] ParameterError),

    #[error("Illegal session transition from {from:?} to {to:?}")]
    InvalidTransition { from: SessionState, to: SessionState },

    #[error("Failed to run renderer: {0}")]
    Renderer(#[source] CollaboratorError),
}
