use std::sync::Arc;

use log::debug;
use services::{Phase, RunnerError, SessionHandle, SessionReview, SessionSnapshot};
use storage::{ThemeCatalog, ThemeSummary};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};
use trivia_core::model::{Difficulty, Theme};

use crate::error::AppError;
use crate::screen::{
    self, AfterGame, DifficultyChoice, ThemeChoice, URGENT_SECONDS, parse_after_game,
    parse_difficulty_choice, parse_selection, parse_theme_choice,
};

/// Line-oriented stdin/stdout pair.
struct Terminal {
    lines: Lines<BufReader<Stdin>>,
    out: Stdout,
}

impl Terminal {
    fn new() -> Self {
        Self {
            lines: BufReader::new(io::stdin()).lines(),
            out: io::stdout(),
        }
    }

    async fn print(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await
    }

    /// `None` once stdin is closed.
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }

    async fn ask(&mut self, text: &str) -> io::Result<Option<String>> {
        self.print(text).await?;
        self.print("> ").await?;
        self.read_line().await
    }
}

/// Theme → difficulty → game → score loop, until the player quits or stdin closes.
pub async fn run(catalog: &dyn ThemeCatalog, mut handle: SessionHandle) -> Result<(), AppError> {
    let themes = catalog.list_themes().await?;
    let mut term = Terminal::new();

    'themes: loop {
        let Some(summary) = choose_theme(&mut term, &themes).await? else {
            return Ok(());
        };
        let theme = catalog.get_theme(&summary.id).await?;

        'difficulty: loop {
            let Some(line) = term.ask(&screen::difficulty_menu(&theme)).await? else {
                return Ok(());
            };
            let difficulty = match parse_difficulty_choice(&line) {
                Some(DifficultyChoice::Pick(difficulty)) => difficulty,
                Some(DifficultyChoice::Back) => continue 'themes,
                None => continue,
            };

            let Some(review) =
                play_game(&mut term, &mut handle, Arc::clone(&theme), difficulty).await?
            else {
                return Ok(());
            };
            handle.reset_game().await?;

            let mut menu = screen::score_screen(&review);
            loop {
                let Some(line) = term.ask(&menu).await? else {
                    return Ok(());
                };
                match parse_after_game(&line) {
                    Some(AfterGame::PlayAgain) => continue 'difficulty,
                    Some(AfterGame::ChangeTheme) => continue 'themes,
                    Some(AfterGame::Quit) => return Ok(()),
                    None => menu = "Pick 1, 2 or 3.\n".to_owned(),
                }
            }
        }
    }
}

async fn choose_theme<'a>(
    term: &mut Terminal,
    themes: &'a [ThemeSummary],
) -> io::Result<Option<&'a ThemeSummary>> {
    let list = screen::theme_list(themes);
    loop {
        let Some(line) = term.ask(&list).await? else {
            return Ok(None);
        };
        match parse_theme_choice(&line, themes.len()) {
            Some(ThemeChoice::Pick(index)) => return Ok(themes.get(index)),
            Some(ThemeChoice::Quit) => return Ok(None),
            None => {}
        }
    }
}

/// Play one game to the end. `None` if stdin closed mid-game.
async fn play_game(
    term: &mut Terminal,
    handle: &mut SessionHandle,
    theme: Arc<Theme>,
    difficulty: Difficulty,
) -> Result<Option<SessionReview>, AppError> {
    let mut snapshot = handle.start_game(theme, difficulty).await?;
    if snapshot.questions.is_empty() {
        term.print("No questions at this difficulty.\n").await?;
    }
    let mut shown = None;

    while snapshot.phase == Phase::Playing {
        if shown != Some(snapshot.current_index) {
            term.print(&screen::question_screen(&snapshot)).await?;
            shown = Some(snapshot.current_index);
        }

        tokio::select! {
            line = term.read_line() => {
                let Some(line) = line? else {
                    handle.reset_game().await?;
                    return Ok(None);
                };
                snapshot = answer(term, handle, snapshot, &line).await?;
            }
            next = handle.changed() => {
                let next = next?;
                report_tick(term, &snapshot, &next).await?;
                snapshot = next;
            }
        }
    }

    Ok(Some(SessionReview::assemble(
        &snapshot.questions,
        &snapshot.answers,
    )))
}

async fn answer(
    term: &mut Terminal,
    handle: &SessionHandle,
    snapshot: SessionSnapshot,
    line: &str,
) -> Result<SessionSnapshot, AppError> {
    let Some(question) = &snapshot.current_question else {
        return Ok(snapshot);
    };
    let Some(selection) = parse_selection(line, question) else {
        term.print("Pick one of the listed answers.\n").await?;
        return Ok(snapshot);
    };

    // The countdown may have moved on while the line was being typed.
    match handle
        .submit_answer_at(snapshot.current_index, Some(selection))
        .await
    {
        Ok(next) => Ok(next),
        Err(RunnerError::Session(err)) => {
            debug!("dropping late answer for question {}: {err}", question.id());
            Ok(handle.snapshot())
        }
        Err(err) => Err(err.into()),
    }
}

async fn report_tick(
    term: &mut Terminal,
    before: &SessionSnapshot,
    after: &SessionSnapshot,
) -> io::Result<()> {
    if after.answers.len() > before.answers.len() {
        if after.answers.last().is_some_and(|a| a.is_unanswered()) {
            term.print("⏰ Time's up!\n").await?;
        }
        return Ok(());
    }
    if after.time_left != before.time_left
        && (after.time_left <= URGENT_SECONDS || after.time_left % 10 == 0)
    {
        term.print(&format!("{}\n", screen::countdown(after.time_left)))
            .await?;
    }
    Ok(())
}
