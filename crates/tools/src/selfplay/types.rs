use anyhow::{Result, bail};
use rchess_core::types::Color;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    InProgress,
    WhiteWin,
    BlackWin,
    Draw,
}

impl GameOutcome {
    pub fn label(self) -> &'static str {
        match self {
            GameOutcome::InProgress => "in_progress",
            GameOutcome::WhiteWin => "white_win",
            GameOutcome::BlackWin => "black_win",
            GameOutcome::Draw => "draw",
        }
    }

    /// `winner` の勝ち
    pub fn win_for(winner: Color) -> Self {
        match winner {
            Color::White => GameOutcome::WhiteWin,
            Color::Black => GameOutcome::BlackWin,
        }
    }
}

pub fn side_label(color: Color) -> char {
    if color == Color::Black { 'b' } else { 'w' }
}

/// `w`/`white`/`b`/`black` を手番に変換（clap の value_parser 用）
pub fn parse_side(s: &str) -> Result<Color> {
    match s.to_ascii_lowercase().as_str() {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        other => bail!("unknown side '{other}' (expected white or black)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_side_accepts_short_and_long_names() {
        assert_eq!(parse_side("w").unwrap(), Color::White);
        assert_eq!(parse_side("Black").unwrap(), Color::Black);
        assert!(parse_side("red").is_err());
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(GameOutcome::win_for(Color::Black).label(), "black_win");
        assert_eq!(side_label(Color::White), 'w');
    }
}
