//! Non-interactive administration commands over the document store.

pub mod commands;
pub mod output;

pub use commands::run_cli;

use crate::core::services::ServiceError;
use crate::errors::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("{0}")]
    Usage(String),
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}
