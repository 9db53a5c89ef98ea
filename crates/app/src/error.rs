use services::{EngineConfigError, RunnerError};
use storage::StorageError;
use thiserror::Error;

/// Everything that can stop the terminal front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("invalid settings: {0}")]
    Config(#[from] EngineConfigError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("no themes found in {0}")]
    NoThemes(String),
}
