use rand::Rng;
use rand::seq::SliceRandom;

use trivia_core::model::{Difficulty, Question, Theme};

/// Selection result for a new game.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPlan {
    pub questions: Vec<Question>,
    /// How many questions in the theme matched the requested difficulty.
    pub matched: usize,
}

impl QuestionPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Picks up to `limit` questions of the given difficulty, uniformly at random
/// and without replacement, in shuffled order.
///
/// `None` stands for an unrecognized difficulty tag and matches nothing.
pub fn plan_questions<R: Rng + ?Sized>(
    theme: &Theme,
    difficulty: Option<Difficulty>,
    limit: usize,
    rng: &mut R,
) -> QuestionPlan {
    let Some(difficulty) = difficulty else {
        return QuestionPlan {
            questions: Vec::new(),
            matched: 0,
        };
    };

    let mut candidates: Vec<Question> = theme.questions_with(difficulty).cloned().collect();
    let matched = candidates.len();
    candidates.as_mut_slice().shuffle(rng);
    candidates.truncate(limit);

    QuestionPlan {
        questions: candidates,
        matched,
    }
}
