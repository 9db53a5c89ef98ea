use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use trivia_core::model::{AnswerRecord, Difficulty, Question, Selection, Theme};

use super::plan::plan_questions;
use super::review::SessionReview;
use crate::error::{EngineConfigError, SessionError};

/// Questions per game unless configured otherwise.
pub const QUESTION_COUNT: usize = 10;

/// Seconds on each question's countdown unless configured otherwise.
pub const TIMER_SECONDS: u32 = 30;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Coarse state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Playing,
    Reviewing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::Reviewing => "reviewing",
        })
    }
}

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    question_count: usize,
    timer_seconds: u32,
}

impl EngineConfig {
    /// # Errors
    ///
    /// Returns `EngineConfigError` if either value is zero.
    pub fn new(question_count: usize, timer_seconds: u32) -> Result<Self, EngineConfigError> {
        if question_count == 0 {
            return Err(EngineConfigError::InvalidQuestionCount);
        }
        if timer_seconds == 0 {
            return Err(EngineConfigError::InvalidTimerSeconds);
        }
        Ok(Self {
            question_count,
            timer_seconds,
        })
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn timer_seconds(&self) -> u32 {
        self.timer_seconds
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            question_count: QUESTION_COUNT,
            timer_seconds: TIMER_SECONDS,
        }
    }
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Identifies one armed countdown. A new handle is issued for every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountdownHandle(u64);

/// Result of answering (or timing out on) the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub record: AnswerRecord,
    pub is_complete: bool,
}

/// Result of feeding one elapsed second to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown is armed.
    Ignored,
    /// The tick belongs to a countdown that has since been replaced or cancelled.
    Stale,
    /// The countdown moved down by one second.
    Counted { time_left: u32 },
    /// The countdown ran out and the current question was submitted unanswered.
    Expired(AnswerOutcome),
}

/// Read-only view of a session handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub theme: Option<Arc<Theme>>,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub current_question: Option<Question>,
    pub answers: Vec<AnswerRecord>,
    pub time_left: u32,
    pub score: usize,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

struct SessionState {
    phase: Phase,
    theme: Option<Arc<Theme>>,
    questions: Vec<Question>,
    current_index: usize,
    answers: Vec<AnswerRecord>,
    time_left: u32,
}

impl SessionState {
    fn idle(timer_seconds: u32) -> Self {
        Self {
            phase: Phase::Idle,
            theme: None,
            questions: Vec::new(),
            current_index: 0,
            answers: Vec::new(),
            time_left: timer_seconds,
        }
    }
}

/// Single-player quiz session state machine.
///
/// `idle → playing` on [`start_game`](Self::start_game), `playing → playing`
/// or `playing → reviewing` on each answer or expiry, and back to `idle` on
/// [`reset_game`](Self::reset_game). The countdown is driven by external calls
/// to [`tick`](Self::tick); at most one countdown handle is live, and only
/// while playing.
pub struct SessionEngine {
    config: EngineConfig,
    state: SessionState,
    countdown: Option<CountdownHandle>,
    next_countdown: u64,
    rng: StdRng,
}

impl SessionEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Engine whose question selection is reproducible.
    #[must_use]
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Self {
        Self {
            config,
            state: SessionState::idle(config.timer_seconds),
            countdown: None,
            next_countdown: 0,
            rng,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn theme(&self) -> Option<&Arc<Theme>> {
        self.state.theme.as_ref()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.state.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.state.answers
    }

    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.state.time_left
    }

    /// The live countdown, if a question is currently being timed.
    #[must_use]
    pub fn countdown(&self) -> Option<CountdownHandle> {
        self.countdown
    }

    /// `questions[current_index]`, if there is one. After the last answer
    /// this is still the final question.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.state.questions.get(self.state.current_index)
    }

    /// Number of correct answers so far.
    #[must_use]
    pub fn score(&self) -> usize {
        self.state.answers.iter().filter(|a| a.correct).count()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.state.phase,
            theme: self.state.theme.clone(),
            questions: self.state.questions.clone(),
            current_index: self.state.current_index,
            current_question: self.current_question().cloned(),
            answers: self.state.answers.clone(),
            time_left: self.state.time_left,
            score: self.score(),
        }
    }

    /// Per-question review of a finished game; `None` unless reviewing.
    #[must_use]
    pub fn review(&self) -> Option<SessionReview> {
        (self.state.phase == Phase::Reviewing)
            .then(|| SessionReview::assemble(&self.state.questions, &self.state.answers))
    }

    /// Start a new game with questions of `difficulty` drawn from `theme`.
    ///
    /// A game already in progress (or under review) is reset first. A theme
    /// without matching questions produces an empty game that goes straight
    /// to `reviewing`.
    pub fn start_game(&mut self, theme: Arc<Theme>, difficulty: Difficulty) {
        self.begin(theme, Some(difficulty));
    }

    /// Like [`start_game`](Self::start_game) but with a raw difficulty tag.
    /// An unrecognized tag selects zero questions.
    pub fn start_game_with_tag(&mut self, theme: Arc<Theme>, tag: &str) {
        let difficulty = Difficulty::from_tag(tag);
        if difficulty.is_none() {
            warn!("unrecognized difficulty tag {tag:?}; no questions will be selected");
        }
        self.begin(theme, difficulty);
    }

    fn begin(&mut self, theme: Arc<Theme>, difficulty: Option<Difficulty>) {
        if self.state.phase != Phase::Idle {
            debug!("restarting session from phase {}", self.state.phase);
            self.reset_game();
        }

        let plan = plan_questions(
            &theme,
            difficulty,
            self.config.question_count,
            &mut self.rng,
        );
        debug!(
            "theme {}: selected {} of {} matching question(s)",
            theme.id(),
            plan.questions.len(),
            plan.matched
        );

        let is_empty = plan.is_empty();
        self.state = SessionState {
            phase: Phase::Playing,
            theme: Some(theme),
            questions: plan.questions,
            current_index: 0,
            answers: Vec::new(),
            time_left: self.config.timer_seconds,
        };

        if is_empty {
            warn!("no questions matched; session goes straight to review");
            self.state.phase = Phase::Reviewing;
        } else {
            self.arm_countdown();
        }
    }

    /// Answer the current question and advance.
    ///
    /// `None` records the question as unanswered. Selections that do not fit
    /// the question are accepted and scored as incorrect.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotPlaying` outside of `playing`; the session is
    /// left untouched.
    pub fn submit_answer(
        &mut self,
        selection: Option<Selection>,
    ) -> Result<AnswerOutcome, SessionError> {
        self.advance(selection)
    }

    /// Answer question `index`, which must still be the current one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleAnswer` if the session has moved to another
    /// question, and `SessionError::NotPlaying` outside of `playing`. Either
    /// way nothing is recorded.
    pub fn submit_answer_at(
        &mut self,
        index: usize,
        selection: Option<Selection>,
    ) -> Result<AnswerOutcome, SessionError> {
        if self.state.phase == Phase::Playing && index != self.state.current_index {
            return Err(SessionError::StaleAnswer {
                index,
                current: self.state.current_index,
            });
        }
        self.advance(selection)
    }

    /// Count one elapsed second on the live countdown.
    pub fn tick(&mut self) -> TickOutcome {
        match self.countdown {
            Some(handle) => self.tick_countdown(handle),
            None => TickOutcome::Ignored,
        }
    }

    /// Count one elapsed second on the countdown identified by `handle`.
    ///
    /// Ticks for a countdown that is no longer live are reported as
    /// `TickOutcome::Stale` and have no effect.
    pub fn tick_countdown(&mut self, handle: CountdownHandle) -> TickOutcome {
        let live = self.countdown;
        match live {
            None => TickOutcome::Ignored,
            Some(live) if live != handle => TickOutcome::Stale,
            Some(_) if self.state.time_left <= 1 => self.expire(),
            Some(_) => {
                self.state.time_left -= 1;
                TickOutcome::Counted {
                    time_left: self.state.time_left,
                }
            }
        }
    }

    /// Return to idle defaults and cancel any countdown. Idempotent.
    pub fn reset_game(&mut self) {
        self.countdown = None;
        self.state = SessionState::idle(self.config.timer_seconds);
    }

    fn expire(&mut self) -> TickOutcome {
        debug!(
            "countdown expired on question {}",
            self.state.current_index + 1
        );
        match self.advance(None) {
            Ok(outcome) => {
                self.state.time_left = self.config.timer_seconds;
                TickOutcome::Expired(outcome)
            }
            Err(err) => {
                warn!("dropping countdown that could not submit: {err}");
                self.countdown = None;
                TickOutcome::Ignored
            }
        }
    }

    fn advance(&mut self, selection: Option<Selection>) -> Result<AnswerOutcome, SessionError> {
        if self.state.phase != Phase::Playing {
            return Err(SessionError::NotPlaying {
                phase: self.state.phase,
            });
        }
        let Some(question) = self.state.questions.get(self.state.current_index) else {
            return Err(SessionError::NoCurrentQuestion);
        };

        self.countdown = None;
        let record = AnswerRecord::score(question, selection);
        self.state.answers.push(record.clone());

        let is_complete = self.state.current_index + 1 >= self.state.questions.len();
        if is_complete {
            debug!(
                "session complete: {}/{} correct",
                self.score(),
                self.state.questions.len()
            );
            self.state.phase = Phase::Reviewing;
        } else {
            self.state.current_index += 1;
            self.state.time_left = self.config.timer_seconds;
            self.arm_countdown();
        }

        Ok(AnswerOutcome {
            record,
            is_complete,
        })
    }

    fn arm_countdown(&mut self) {
        self.countdown = Some(CountdownHandle(self.next_countdown));
        self.next_countdown = self.next_countdown.wrapping_add(1);
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEngine")
            .field("phase", &self.state.phase)
            .field("questions_len", &self.state.questions.len())
            .field("current_index", &self.state.current_index)
            .field("answers_len", &self.state.answers.len())
            .field("time_left", &self.state.time_left)
            .field("countdown", &self.countdown)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
