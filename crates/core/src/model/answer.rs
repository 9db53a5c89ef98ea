use serde::Serialize;

use crate::model::ids::QuestionId;
use crate::model::question::{Question, Selection};

/// Record of a single answered (or timed-out) question.
///
/// Created once per question, in question order, and never mutated after it
/// is appended to a session's answer log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub selected_answer: Option<Selection>,
    pub correct: bool,
}

impl AnswerRecord {
    /// Scores `selected_answer` against `question` and records the outcome.
    #[must_use]
    pub fn score(question: &Question, selected_answer: Option<Selection>) -> Self {
        Self {
            question_id: question.id().clone(),
            selected_answer,
            correct: question.is_correct(selected_answer),
        }
    }

    /// True when the player never responded.
    #[must_use]
    pub fn is_unanswered(&self) -> bool {
        self.selected_answer.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    #[test]
    fn scoring_derives_correct_flag() {
        let q = Question::true_false(QuestionId::new("q1"), "Cats purr", Difficulty::Easy, true)
            .unwrap();

        let right = AnswerRecord::score(&q, Some(Selection::Bool(true)));
        assert!(right.correct);
        assert_eq!(right.question_id, QuestionId::new("q1"));

        let missing = AnswerRecord::score(&q, None);
        assert!(!missing.correct);
        assert!(missing.is_unanswered());
    }

    #[test]
    fn serializes_with_camel_case_and_null_sentinel() {
        let q = Question::true_false(QuestionId::new("q1"), "Cats purr", Difficulty::Easy, true)
            .unwrap();
        let value = serde_json::to_value(AnswerRecord::score(&q, None)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"questionId": "q1", "selectedAnswer": null, "correct": false})
        );
    }
}
