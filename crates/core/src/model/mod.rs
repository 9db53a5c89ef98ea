mod answer;
mod difficulty;
mod ids;
mod question;
mod theme;

pub use answer::AnswerRecord;
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use ids::{QuestionId, ThemeId};
pub use question::{Question, QuestionError, QuestionKind, Selection};
pub use theme::{Theme, ThemeError};
