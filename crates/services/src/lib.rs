#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use sessions as session;

pub use error::{EngineConfigError, RunnerError, SessionError};
pub use sessions::{
    AnswerOutcome, EngineConfig, Phase, QUESTION_COUNT, ReviewItem, SessionEngine, SessionHandle,
    SessionReview, SessionSnapshot, TIMER_SECONDS, TickOutcome, spawn_session,
};
