use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rchess_core::position::{Position, ROWS};

use crate::common::io::open_reader;

/// 初期配置（黒が上、白が下）
pub const START_ROWS: [&str; ROWS] = [
    "rnbqkbnr", "pppppppp", "        ", "        ", "        ", "        ", "PPPPPPPP", "RNBQKBNR",
];

pub fn start_position() -> Position {
    // 定数なので失敗しない
    Position::from_rows(&START_ROWS).unwrap_or_default()
}

/// 盤面ファイルを読む
///
/// JSON（8要素の文字列配列）か、8行のテキストを受け付ける。
/// テキストでは `.` を空き升として扱い、行末の欠けた空白は補う。`#` 行は無視する。
pub fn load_board(path: &Path) -> Result<Position> {
    let mut text = String::new();
    open_reader(path)
        .and_then(|mut r| r.read_to_string(&mut text))
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_board_text(&text).with_context(|| format!("invalid board in {}", path.display()))
}

pub fn parse_board_text(text: &str) -> Result<Position> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).context("failed to parse JSON board");
    }

    let mut rows = Vec::with_capacity(ROWS);
    for line in text.lines() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let mut row: String = line.chars().map(|c| if c == '.' { ' ' } else { c }).collect();
        let len = row.chars().count();
        if len < 8 {
            row.extend(std::iter::repeat_n(' ', 8 - len));
        }
        rows.push(row);
    }
    if rows.is_empty() {
        bail!("board text is empty");
    }
    Ok(Position::from_rows(&rows)?)
}
