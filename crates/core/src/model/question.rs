use serde::Serialize;
use thiserror::Error;

use crate::model::difficulty::Difficulty;
use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,

    #[error("question {id}: prompt cannot be empty")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id}: multiple-choice needs at least 2 options, got {len}")]
    TooFewOptions { id: QuestionId, len: usize },

    #[error("question {id}: correct index {index} is out of range for {len} options")]
    CorrectOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },
}

//
// ─── SELECTION ─────────────────────────────────────────────────────────────────
//

/// A player's answer to a question.
///
/// "No answer" is modelled as `Option::<Selection>::None`, so it can never be
/// confused with option `0` or with `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Selection {
    /// Index into a multiple-choice question's options.
    Index(usize),
    /// Answer to a true-false question.
    Bool(bool),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Variant of a question together with its correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice { options: Vec<String>, correct: usize },
    TrueFalse { correct: bool },
}

/// A validated trivia question.
///
/// Only constructible through [`Question::multiple_choice`] and
/// [`Question::true_false`], which enforce that the correct answer matches the
/// variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    #[serde(rename = "question")]
    prompt: String,
    difficulty: Difficulty,
    #[serde(flatten)]
    kind: QuestionKind,
}

impl Question {
    /// Creates a multiple-choice question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::TooFewOptions` for fewer than two options and
    /// `QuestionError::CorrectOutOfRange` if `correct` is not a valid position.
    pub fn multiple_choice(
        id: QuestionId,
        prompt: impl Into<String>,
        difficulty: Difficulty,
        options: Vec<String>,
        correct: usize,
    ) -> Result<Self, QuestionError> {
        let prompt = validate_header(&id, prompt.into())?;
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                id,
                len: options.len(),
            });
        }
        if correct >= options.len() {
            return Err(QuestionError::CorrectOutOfRange {
                id,
                index: correct,
                len: options.len(),
            });
        }

        Ok(Self {
            id,
            prompt,
            difficulty,
            kind: QuestionKind::MultipleChoice { options, correct },
        })
    }

    /// Creates a true-false question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the id or prompt is blank.
    pub fn true_false(
        id: QuestionId,
        prompt: impl Into<String>,
        difficulty: Difficulty,
        correct: bool,
    ) -> Result<Self, QuestionError> {
        let prompt = validate_header(&id, prompt.into())?;
        Ok(Self {
            id,
            prompt,
            difficulty,
            kind: QuestionKind::TrueFalse { correct },
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// The selection that scores as correct.
    #[must_use]
    pub fn correct_selection(&self) -> Selection {
        match self.kind {
            QuestionKind::MultipleChoice { correct, .. } => Selection::Index(correct),
            QuestionKind::TrueFalse { correct } => Selection::Bool(correct),
        }
    }

    /// Scores a selection. No answer, a mismatched variant, or an
    /// out-of-range index is incorrect.
    #[must_use]
    pub fn is_correct(&self, selection: Option<Selection>) -> bool {
        match (&self.kind, selection) {
            (QuestionKind::MultipleChoice { correct, .. }, Some(Selection::Index(index))) => {
                index == *correct
            }
            (QuestionKind::TrueFalse { correct }, Some(Selection::Bool(value))) => {
                value == *correct
            }
            _ => false,
        }
    }

    /// Human-readable label for a selection, if it names something this question offers.
    #[must_use]
    pub fn label_for(&self, selection: Selection) -> Option<String> {
        match (&self.kind, selection) {
            (QuestionKind::MultipleChoice { options, .. }, Selection::Index(index)) => {
                options.get(index).cloned()
            }
            (QuestionKind::TrueFalse { .. }, Selection::Bool(value)) => Some(value.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn correct_label(&self) -> String {
        match &self.kind {
            QuestionKind::MultipleChoice { options, correct } => {
                options.get(*correct).cloned().unwrap_or_default()
            }
            QuestionKind::TrueFalse { correct } => correct.to_string(),
        }
    }
}

fn validate_header(id: &QuestionId, prompt: String) -> Result<String, QuestionError> {
    if id.is_blank() {
        return Err(QuestionError::EmptyId);
    }
    if prompt.trim().is_empty() {
        return Err(QuestionError::EmptyPrompt { id: id.clone() });
    }
    Ok(prompt)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
