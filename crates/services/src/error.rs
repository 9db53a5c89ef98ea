//! Shared error types for the services crate.

use thiserror::Error;

use crate::sessions::Phase;

/// Errors emitted by the session engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no game in progress (phase: {phase})")]
    NotPlaying { phase: Phase },
    #[error("session has no current question")]
    NoCurrentQuestion,
    #[error("answer for question {index} arrived after moving on to question {current}")]
    StaleAnswer { index: usize, current: usize },
}

/// Errors emitted while building an `EngineConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineConfigError {
    #[error("question count must be > 0")]
    InvalidQuestionCount,
    #[error("timer seconds must be > 0")]
    InvalidTimerSeconds,
}

/// Errors emitted by `SessionHandle`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RunnerError {
    #[error("session runner has stopped")]
    Closed,
    #[error(transparent)]
    Session(#[from] SessionError),
}
