mod engine;
mod plan;
mod review;
mod runner;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use engine::{
    AnswerOutcome, CountdownHandle, EngineConfig, Phase, QUESTION_COUNT, SessionEngine,
    SessionSnapshot, TIMER_SECONDS, TickOutcome,
};
pub use plan::{QuestionPlan, plan_questions};
pub use review::{ReviewItem, SessionReview};
pub use runner::{SessionHandle, spawn_session};
