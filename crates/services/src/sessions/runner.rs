use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use trivia_core::model::{Difficulty, Selection, Theme};

use super::engine::{SessionEngine, SessionSnapshot, TickOutcome};
use crate::error::{RunnerError, SessionError};

const TICK: Duration = Duration::from_secs(1);
const COMMAND_BUFFER: usize = 16;

enum StartWith {
    Difficulty(Difficulty),
    Tag(String),
}

enum Command {
    Start {
        theme: Arc<Theme>,
        with: StartWith,
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Submit {
        /// Question the answer was given for; `None` answers whatever is current.
        index: Option<usize>,
        selection: Option<Selection>,
        reply: oneshot::Sender<Result<SessionSnapshot, SessionError>>,
    },
    Reset {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Cloneable front door to a session running on its own task.
///
/// Every intent goes through one channel and is applied by the task that
/// owns the engine, interleaved with countdown ticks, so the engine never
/// sees two events at once.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

/// Move `engine` onto a tokio task that drives its countdown once per second.
///
/// The task stops once every `SessionHandle` has been dropped.
pub fn spawn_session(engine: SessionEngine) -> (SessionHandle, JoinHandle<()>) {
    let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
    let (publisher, snapshots) = watch::channel(engine.snapshot());
    let task = tokio::spawn(run(engine, receiver, publisher));
    (
        SessionHandle {
            commands,
            snapshots,
        },
        task,
    )
}

impl SessionHandle {
    /// # Errors
    ///
    /// Returns `RunnerError::Closed` if the session task has stopped.
    pub async fn start_game(
        &self,
        theme: Arc<Theme>,
        difficulty: Difficulty,
    ) -> Result<SessionSnapshot, RunnerError> {
        self.start(theme, StartWith::Difficulty(difficulty)).await
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Closed` if the session task has stopped.
    pub async fn start_game_with_tag(
        &self,
        theme: Arc<Theme>,
        tag: impl Into<String>,
    ) -> Result<SessionSnapshot, RunnerError> {
        self.start(theme, StartWith::Tag(tag.into())).await
    }

    async fn start(
        &self,
        theme: Arc<Theme>,
        with: StartWith,
    ) -> Result<SessionSnapshot, RunnerError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Start { theme, with, reply }).await?;
        response.await.map_err(|_| RunnerError::Closed)
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Session` if no game is in progress, or
    /// `RunnerError::Closed` if the session task has stopped.
    pub async fn submit_answer(
        &self,
        selection: Option<Selection>,
    ) -> Result<SessionSnapshot, RunnerError> {
        self.submit(None, selection).await
    }

    /// Answer question `index`. The check that it is still current happens
    /// on the session task, so an expiry cannot slip in between.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Session(SessionError::StaleAnswer { .. })` if the
    /// session already moved past `index`, `RunnerError::Session` if no game
    /// is in progress, or `RunnerError::Closed` if the session task has stopped.
    pub async fn submit_answer_at(
        &self,
        index: usize,
        selection: Option<Selection>,
    ) -> Result<SessionSnapshot, RunnerError> {
        self.submit(Some(index), selection).await
    }

    async fn submit(
        &self,
        index: Option<usize>,
        selection: Option<Selection>,
    ) -> Result<SessionSnapshot, RunnerError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Submit {
            index,
            selection,
            reply,
        })
        .await?;
        Ok(response.await.map_err(|_| RunnerError::Closed)??)
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Closed` if the session task has stopped.
    pub async fn reset_game(&self) -> Result<SessionSnapshot, RunnerError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Reset { reply }).await?;
        response.await.map_err(|_| RunnerError::Closed)
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Wait until the session changes and return the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Closed` if the session task has stopped.
    pub async fn changed(&mut self) -> Result<SessionSnapshot, RunnerError> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| RunnerError::Closed)?;
        Ok(self.snapshots.borrow_and_update().clone())
    }

    async fn send(&self, command: Command) -> Result<(), RunnerError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| RunnerError::Closed)
    }
}

async fn run(
    mut engine: SessionEngine,
    mut commands: mpsc::Receiver<Command>,
    publisher: watch::Sender<SessionSnapshot>,
) {
    let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut armed = engine.countdown();

    loop {
        // A new countdown gets a full second before its first tick.
        let live = engine.countdown();
        if live != armed {
            ticker.reset();
            armed = live;
        }

        tokio::select! {
            biased;

            command = commands.recv() => {
                let Some(command) = command else { break };
                apply(&mut engine, command, &publisher);
            }
            _ = ticker.tick(), if live.is_some() => {
                if let Some(handle) = live {
                    if let TickOutcome::Expired(outcome) = engine.tick_countdown(handle) {
                        debug!("question {} timed out", outcome.record.question_id);
                    }
                    publisher.send_replace(engine.snapshot());
                }
            }
        }
    }

    debug!("session runner stopped");
}

fn apply(engine: &mut SessionEngine, command: Command, publisher: &watch::Sender<SessionSnapshot>) {
    match command {
        Command::Start { theme, with, reply } => {
            match with {
                StartWith::Difficulty(difficulty) => engine.start_game(theme, difficulty),
                StartWith::Tag(tag) => engine.start_game_with_tag(theme, &tag),
            }
            let _ = reply.send(publish(engine, publisher));
        }
        Command::Submit {
            index,
            selection,
            reply,
        } => {
            let result = match index {
                Some(index) => engine.submit_answer_at(index, selection),
                None => engine.submit_answer(selection),
            }
            .map(|_| publish(engine, publisher));
            let _ = reply.send(result);
        }
        Command::Reset { reply } => {
            engine.reset_game();
            let _ = reply.send(publish(engine, publisher));
        }
    }
}

fn publish(engine: &SessionEngine, publisher: &watch::Sender<SessionSnapshot>) -> SessionSnapshot {
    let snapshot = engine.snapshot();
    publisher.send_replace(snapshot.clone());
    snapshot
}
