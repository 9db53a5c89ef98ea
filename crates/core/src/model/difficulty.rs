use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty tag: {0:?}")]
pub struct ParseDifficultyError(pub String);

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Tag partitioning a theme's question pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Every difficulty, in display order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Maps a raw tag to a difficulty. Tags are matched exactly, so `"Easy"` is unknown.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| ParseDifficultyError(s.to_owned()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_map_to_difficulties() {
        assert_eq!(Difficulty::from_tag("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_tag("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_tag("Easy"), None);
        assert_eq!(Difficulty::from_tag("expert"), None);
    }

    #[test]
    fn display_matches_tag() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_tag(&difficulty.to_string()), Some(difficulty));
        }
    }

    #[test]
    fn parse_reports_unknown_tag() {
        let err = "legendary".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.to_string(), "unknown difficulty tag: \"legendary\"");
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
