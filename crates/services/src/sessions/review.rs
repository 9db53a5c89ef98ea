use serde::Serialize;

use trivia_core::model::{AnswerRecord, Question, QuestionId};

/// One line of the end-of-game answer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub question_id: QuestionId,
    pub prompt: String,
    pub correct: bool,
    /// Label of what the player picked; `None` when they did not answer or
    /// picked something the question does not offer.
    pub selected_label: Option<String>,
    pub correct_label: String,
}

/// Scored summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReview {
    pub score: usize,
    pub total: usize,
    /// `score / total` as a rounded percentage; 0 for an empty game.
    pub percent: u32,
    pub items: Vec<ReviewItem>,
}

impl SessionReview {
    /// Pair each question with its answer record, in question order.
    #[must_use]
    pub fn assemble(questions: &[Question], answers: &[AnswerRecord]) -> Self {
        let items: Vec<ReviewItem> = questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let answer = answers.get(i);
                let selection = answer.and_then(|a| a.selected_answer);
                ReviewItem {
                    question_id: question.id().clone(),
                    prompt: question.prompt().to_owned(),
                    correct: answer.is_some_and(|a| a.correct),
                    selected_label: selection.and_then(|s| question.label_for(s)),
                    correct_label: question.correct_label(),
                }
            })
            .collect();

        let score = items.iter().filter(|item| item.correct).count();
        let total = questions.len();
        Self {
            score,
            total,
            percent: percent(score, total),
            items,
        }
    }

    /// Items the player got wrong or left unanswered.
    pub fn mistakes(&self) -> impl Iterator<Item = &ReviewItem> {
        self.items.iter().filter(|item| !item.correct)
    }
}

fn percent(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (score.saturating_mul(100) + total / 2) / total;
    u32::try_from(rounded).unwrap_or(100)
}
