use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::difficulty::Difficulty;
use crate::model::ids::{QuestionId, ThemeId};
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ThemeError {
    #[error("theme id cannot be empty")]
    EmptyId,

    #[error("theme {id}: name cannot be empty")]
    EmptyName { id: ThemeId },

    #[error("theme {theme}: duplicate question id {question}")]
    DuplicateQuestionId { theme: ThemeId, question: QuestionId },
}

//
// ─── THEME ─────────────────────────────────────────────────────────────────────
//

/// A themed pool of questions, as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    id: ThemeId,
    name: String,
    icon: String,
    description: String,
    questions: Vec<Question>,
}

impl Theme {
    /// Creates a theme from already-validated questions.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError` for a blank id or name, or if two questions share an id.
    pub fn new(
        id: ThemeId,
        name: impl Into<String>,
        icon: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, ThemeError> {
        if id.is_blank() {
            return Err(ThemeError::EmptyId);
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ThemeError::EmptyName { id });
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(ThemeError::DuplicateQuestionId {
                    theme: id.clone(),
                    question: question.id().clone(),
                });
            }
        }

        Ok(Self {
            id,
            name,
            icon: icon.into(),
            description: description.into(),
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ThemeId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions tagged with the given difficulty, in catalog order.
    pub fn questions_with(&self, difficulty: Difficulty) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| q.difficulty() == difficulty)
    }

    #[must_use]
    pub fn count_with(&self, difficulty: Difficulty) -> usize {
        self.questions_with(difficulty).count()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn tf(id: &str, difficulty: Difficulty) -> Question {
        Question::true_false(QuestionId::new(id), format!("Prompt {id}"), difficulty, true).unwrap()
    }

    #[test]
    fn filters_by_difficulty() {
        let theme = Theme::new(
            ThemeId::new("mixed"),
            "Mixed",
            "🎲",
            "A bit of everything",
            vec![
                tf("1", Difficulty::Easy),
                tf("2", Difficulty::Hard),
                tf("3", Difficulty::Easy),
            ],
        )
        .unwrap();

        let easy: Vec<_> = theme
            .questions_with(Difficulty::Easy)
            .map(|q| q.id().as_str())
            .collect();
        assert_eq!(easy, vec!["1", "3"]);
        assert_eq!(theme.count_with(Difficulty::Medium), 0);
    }

    #[test]
    fn duplicate_question_ids_are_rejected() {
        let err = Theme::new(
            ThemeId::new("dup"),
            "Dup",
            "",
            "",
            vec![tf("1", Difficulty::Easy), tf("1", Difficulty::Hard)],
        )
        .unwrap_err();
        assert!(matches!(err, ThemeError::DuplicateQuestionId { .. }));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Theme::new(ThemeId::new("t"), " ", "", "", Vec::new()).unwrap_err();
        assert_eq!(
            err,
            ThemeError::EmptyName {
                id: ThemeId::new("t")
            }
        );
    }
}
