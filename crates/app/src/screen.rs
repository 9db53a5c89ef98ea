//! Text rendering and input parsing for the terminal front end.
//!
//! Nothing here touches stdin/stdout, so every screen can be checked in tests.

use std::fmt::Write as _;

use services::{SessionReview, SessionSnapshot};
use storage::ThemeSummary;
use trivia_core::model::{Difficulty, Question, QuestionKind, Selection, Theme};

/// Countdown values at or below this are shown as urgent.
pub const URGENT_SECONDS: u32 = 10;

//
// ─── INPUT ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Pick(usize),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyChoice {
    Pick(Difficulty),
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterGame {
    PlayAgain,
    ChangeTheme,
    Quit,
}

fn is_quit(input: &str) -> bool {
    matches!(input, "q" | "quit")
}

/// Parse a 1-based theme number out of `count` listed themes.
#[must_use]
pub fn parse_theme_choice(input: &str, count: usize) -> Option<ThemeChoice> {
    let input = input.trim().to_ascii_lowercase();
    if is_quit(&input) {
        return Some(ThemeChoice::Quit);
    }
    let n: usize = input.parse().ok()?;
    (1..=count).contains(&n).then(|| ThemeChoice::Pick(n - 1))
}

/// Accepts a menu number or a difficulty tag.
#[must_use]
pub fn parse_difficulty_choice(input: &str) -> Option<DifficultyChoice> {
    let input = input.trim().to_ascii_lowercase();
    match input.as_str() {
        "b" | "back" | "4" => return Some(DifficultyChoice::Back),
        _ => {}
    }
    if let Ok(n) = input.parse::<usize>() {
        return Difficulty::ALL
            .get(n.checked_sub(1)?)
            .copied()
            .map(DifficultyChoice::Pick);
    }
    Difficulty::from_tag(&input).map(DifficultyChoice::Pick)
}

/// Turn typed input into an answer for `question`.
///
/// Multiple-choice takes the 1-based option number. True-false takes
/// `t`/`true`/`1` or `f`/`false`/`2`. Anything else is `None` so the player
/// can try again.
#[must_use]
pub fn parse_selection(input: &str, question: &Question) -> Option<Selection> {
    let input = input.trim().to_ascii_lowercase();
    match question.kind() {
        QuestionKind::MultipleChoice { options, .. } => {
            let n: usize = input.parse().ok()?;
            (1..=options.len())
                .contains(&n)
                .then(|| Selection::Index(n - 1))
        }
        QuestionKind::TrueFalse { .. } => match input.as_str() {
            "t" | "true" | "1" => Some(Selection::Bool(true)),
            "f" | "false" | "2" => Some(Selection::Bool(false)),
            _ => None,
        },
    }
}

#[must_use]
pub fn parse_after_game(input: &str) -> Option<AfterGame> {
    let input = input.trim().to_ascii_lowercase();
    match input.as_str() {
        "1" | "p" | "play" => Some(AfterGame::PlayAgain),
        "2" | "c" | "change" => Some(AfterGame::ChangeTheme),
        "3" | "q" | "quit" => Some(AfterGame::Quit),
        _ => None,
    }
}

//
// ─── RENDERING ─────────────────────────────────────────────────────────────────
//

#[must_use]
pub fn theme_list(themes: &[ThemeSummary]) -> String {
    let mut out = String::from("Choose a theme:\n");
    for (i, theme) in themes.iter().enumerate() {
        let _ = writeln!(out, "  {}) {} {}", i + 1, theme.icon, theme.name);
        if !theme.description.is_empty() {
            let _ = writeln!(out, "     {}", theme.description);
        }
    }
    out.push_str("  q) quit\n");
    out
}

#[must_use]
pub fn difficulty_menu(theme: &Theme) -> String {
    let mut out = format!("{} {}: choose a difficulty\n", theme.icon(), theme.name());
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}) {} ({} questions)",
            i + 1,
            difficulty,
            theme.count_with(*difficulty)
        );
    }
    let _ = writeln!(out, "  {}) back", Difficulty::ALL.len() + 1);
    out
}

/// The current question with its answer choices.
#[must_use]
pub fn question_screen(snapshot: &SessionSnapshot) -> String {
    let Some(question) = &snapshot.current_question else {
        return String::new();
    };
    let mut out = format!(
        "\nQuestion {}/{}\n{}\n",
        snapshot.current_index + 1,
        snapshot.questions.len(),
        question.prompt()
    );
    match question.kind() {
        QuestionKind::MultipleChoice { options, .. } => {
            for (i, option) in options.iter().enumerate() {
                let _ = writeln!(out, "  {}) {}", i + 1, option);
            }
        }
        QuestionKind::TrueFalse { .. } => {
            out.push_str("  1) true\n  2) false\n");
        }
    }
    out.push_str(&countdown(snapshot.time_left));
    out.push('\n');
    out
}

#[must_use]
pub fn countdown(time_left: u32) -> String {
    if time_left <= URGENT_SECONDS {
        format!("⏱  {time_left}s left!")
    } else {
        format!("⏱  {time_left}s")
    }
}

#[must_use]
pub fn score_screen(review: &SessionReview) -> String {
    let mut out = format!(
        "\nYou scored {}/{} ({}%)\n",
        review.score, review.total, review.percent
    );
    for item in &review.items {
        let mark = if item.correct { '✓' } else { '✗' };
        let _ = writeln!(out, "  {mark} {}", item.prompt);
        if !item.correct {
            let yours = item.selected_label.as_deref().unwrap_or("no answer");
            let _ = writeln!(out, "      Your answer: {yours}");
            let _ = writeln!(out, "      Correct: {}", item.correct_label);
        }
    }
    out.push_str("\n  1) play again\n  2) change theme\n  3) quit\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::{AnswerRecord, QuestionId, ThemeId};

    fn mc() -> Question {
        Question::multiple_choice(
            QuestionId::new("mc"),
            "Largest planet?",
            Difficulty::Easy,
            vec!["Mars".into(), "Jupiter".into(), "Venus".into()],
            1,
        )
        .unwrap()
    }

    fn tf() -> Question {
        Question::true_false(QuestionId::new("tf"), "Sky is blue", Difficulty::Easy, true).unwrap()
    }

    #[test]
    fn selection_is_one_based_for_options() {
        let q = mc();
        assert_eq!(parse_selection("1", &q), Some(Selection::Index(0)));
        assert_eq!(parse_selection(" 3 ", &q), Some(Selection::Index(2)));
        assert_eq!(parse_selection("0", &q), None);
        assert_eq!(parse_selection("4", &q), None);
        assert_eq!(parse_selection("true", &q), None);
    }

    #[test]
    fn selection_accepts_true_false_words() {
        let q = tf();
        assert_eq!(parse_selection("T", &q), Some(Selection::Bool(true)));
        assert_eq!(parse_selection("false", &q), Some(Selection::Bool(false)));
        assert_eq!(parse_selection("2", &q), Some(Selection::Bool(false)));
        assert_eq!(parse_selection("yes", &q), None);
    }

    #[test]
    fn difficulty_by_number_or_tag() {
        assert_eq!(
            parse_difficulty_choice("1"),
            Some(DifficultyChoice::Pick(Difficulty::Easy))
        );
        assert_eq!(
            parse_difficulty_choice("Hard"),
            Some(DifficultyChoice::Pick(Difficulty::Hard))
        );
        assert_eq!(parse_difficulty_choice("4"), Some(DifficultyChoice::Back));
        assert_eq!(parse_difficulty_choice("0"), None);
        assert_eq!(parse_difficulty_choice("expert"), None);
    }

    #[test]
    fn theme_choice_bounds() {
        assert_eq!(parse_theme_choice("2", 2), Some(ThemeChoice::Pick(1)));
        assert_eq!(parse_theme_choice("3", 2), None);
        assert_eq!(parse_theme_choice("Q", 2), Some(ThemeChoice::Quit));
    }

    #[test]
    fn after_game_menu() {
        assert_eq!(parse_after_game("1"), Some(AfterGame::PlayAgain));
        assert_eq!(parse_after_game("change"), Some(AfterGame::ChangeTheme));
        assert_eq!(parse_after_game("q"), Some(AfterGame::Quit));
        assert_eq!(parse_after_game(""), None);
    }

    #[test]
    fn countdown_turns_urgent_at_ten_seconds() {
        assert_eq!(countdown(11), "⏱  11s");
        assert_eq!(countdown(10), "⏱  10s left!");
    }

    #[test]
    fn difficulty_menu_shows_pool_sizes() {
        let theme = Theme::new(ThemeId::new("t"), "Test", "🧪", "", vec![mc(), tf()]).unwrap();
        let menu = difficulty_menu(&theme);
        assert!(menu.contains("1) easy (2 questions)"));
        assert!(menu.contains("3) hard (0 questions)"));
        assert!(menu.contains("4) back"));
    }

    #[test]
    fn score_screen_lists_corrections() {
        let questions = vec![mc(), tf()];
        let answers = vec![
            AnswerRecord::score(&questions[0], Some(Selection::Index(0))),
            AnswerRecord::score(&questions[1], Some(Selection::Bool(true))),
        ];
        let review = SessionReview::assemble(&questions, &answers);
        let text = score_screen(&review);

        assert!(text.contains("You scored 1/2 (50%)"));
        assert!(text.contains("✗ Largest planet?"));
        assert!(text.contains("Your answer: Mars"));
        assert!(text.contains("Correct: Jupiter"));
        assert!(text.contains("✓ Sky is blue"));
    }

    #[test]
    fn unanswered_shows_no_answer() {
        let questions = vec![tf()];
        let answers = vec![AnswerRecord::score(&questions[0], None)];
        let text = score_screen(&SessionReview::assemble(&questions, &answers));
        assert!(text.contains("Your answer: no answer"));
    }
}
