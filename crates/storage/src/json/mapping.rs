use serde::Deserialize;
use thiserror::Error;
use trivia_core::model::{Difficulty, Question, QuestionId, Theme, ThemeId};

/// Errors raised while turning catalog records into domain types.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordError {
    #[error("question {id}: unknown question type {kind:?}")]
    UnknownType { id: QuestionId, kind: String },

    #[error("question {id}: multiple-choice question has no options")]
    MissingOptions { id: QuestionId },

    #[error("question {id}: `correct` must be an option index for multiple-choice")]
    ExpectedIndex { id: QuestionId },

    #[error("question {id}: `correct` must be a boolean for true-false")]
    ExpectedBool { id: QuestionId },

    #[error(transparent)]
    Domain(#[from] trivia_core::Error),
}

/// A theme file holds either one theme object or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ThemeFile {
    Many(Vec<ThemeRecord>),
    One(ThemeRecord),
}

impl ThemeFile {
    pub(crate) fn into_records(self) -> Vec<ThemeRecord> {
        match self {
            ThemeFile::Many(records) => records,
            ThemeFile::One(record) => vec![record],
        }
    }
}

/// On-disk shape of a theme.
#[derive(Debug, Deserialize)]
pub(crate) struct ThemeRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<QuestionRecord>,
}

/// On-disk shape of a question. `options` is only meaningful for multiple-choice.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRecord {
    pub id: RawId,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub correct: RawCorrect,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawCorrect {
    Index(u64),
    Bool(bool),
}

impl From<RawId> for QuestionId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => QuestionId::from(n),
            RawId::Text(s) => QuestionId::new(s),
        }
    }
}

impl QuestionRecord {
    /// Convert the record into a validated `Question`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` when the correct-answer field does not fit the
    /// variant, or when domain validation fails.
    pub(crate) fn into_question(self) -> Result<Question, RecordError> {
        let id = QuestionId::from(self.id);
        let difficulty: Difficulty = self
            .difficulty
            .parse()
            .map_err(trivia_core::Error::from)?;

        let question = match self.kind.as_str() {
            "multiple-choice" => {
                let options = self
                    .options
                    .ok_or_else(|| RecordError::MissingOptions { id: id.clone() })?;
                let RawCorrect::Index(index) = self.correct else {
                    return Err(RecordError::ExpectedIndex { id });
                };
                let index = usize::try_from(index).unwrap_or(usize::MAX);
                Question::multiple_choice(id, self.question, difficulty, options, index)
            }
            "true-false" => {
                let RawCorrect::Bool(correct) = self.correct else {
                    return Err(RecordError::ExpectedBool { id });
                };
                Question::true_false(id, self.question, difficulty, correct)
            }
            _ => {
                return Err(RecordError::UnknownType {
                    id,
                    kind: self.kind,
                });
            }
        };

        question.map_err(|e| RecordError::Domain(e.into()))
    }
}

impl ThemeRecord {
    /// Convert the record (and all of its questions) into a validated `Theme`.
    ///
    /// # Errors
    ///
    /// Returns the first `RecordError` found; no partially converted theme is produced.
    pub(crate) fn into_theme(self) -> Result<Theme, RecordError> {
        let questions = self
            .questions
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect::<Result<Vec<_>, _>>()?;

        Theme::new(
            ThemeId::new(self.id),
            self.name,
            self.icon,
            self.description,
            questions,
        )
        .map_err(|e| RecordError::Domain(e.into()))
    }
}
