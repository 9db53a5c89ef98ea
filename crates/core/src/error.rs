use thiserror::Error;

use crate::model::{ParseDifficultyError, QuestionError, ThemeError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error(transparent)]
    Difficulty(#[from] ParseDifficultyError),
}
