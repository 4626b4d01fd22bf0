//! 盤面テキスト形式の解析・出力
//!
//! 8要素の文字列列で、各要素が1行（8文字）。空白は空き升、大文字は白、小文字は黒。
//! JSON では文字列配列として表す。
//!
//! ```text
//! ["      k ", "   q pp ", "p    n p", "Pp  p n ", " Pp P   ", "  P Q PP", "  B NP  ", "     K  "]
//! ```

use super::pos::Position;
use crate::types::{Piece, Square};
use serde::de::Error as _;
use serde::ser::SerializeSeq;

/// 行数（= 1行の文字数）
pub const ROWS: usize = 8;

/// 盤面テキストの解析エラー
///
/// 部分的な復元は行わず、最初に見つかった不正で打ち切る。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardTextError {
    /// 9行以上ある
    #[error("More than 8 rows were found: {0}")]
    TooManyRows(usize),
    /// 行が足りない
    #[error("Expected 8 rows, found {0}")]
    MissingRows(usize),
    /// 行の長さが 8 文字でない
    #[error("Row {row}: string of length 8 expected, got {len}")]
    RowLength { row: usize, len: usize },
    /// 未知の駒文字
    #[error("Row {row}, column {col}: unexpected piece {ch:?}")]
    UnknownPiece { row: usize, col: usize, ch: char },
}

impl Position {
    /// 行文字列の列から局面を生成
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Position, BoardTextError> {
        if rows.len() > ROWS {
            return Err(BoardTextError::TooManyRows(rows.len()));
        }
        if rows.len() < ROWS {
            return Err(BoardTextError::MissingRows(rows.len()));
        }

        let mut pos = Position::empty();
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != ROWS {
                return Err(BoardTextError::RowLength { row: y, len });
            }
            for (x, ch) in row.chars().enumerate() {
                let pc = Piece::from_char(ch).ok_or(BoardTextError::UnknownPiece {
                    row: y,
                    col: x,
                    ch,
                })?;
                // x, y とも 0..8 が確定している
                let sq = Square::from_index(y * ROWS + x);
                pos.put_piece(sq, pc);
            }
        }
        Ok(pos)
    }

    /// 行文字列の列に変換
    pub fn to_rows(&self) -> [String; ROWS] {
        std::array::from_fn(|y| {
            (0..ROWS).map(|x| self.piece_on(Square::from_index(y * ROWS + x)).to_char()).collect()
        })
    }
}

impl serde::Serialize for Position {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows = self.to_rows();
        let mut seq = serializer.serialize_seq(Some(rows.len()))?;
        for row in &rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

impl<'de> serde::Deserialize<'de> for Position {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Position::from_rows(&rows).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};

    const MIDGAME: [&str; ROWS] = [
        "      k ", "   q pp ", "p    n p", "Pp  p n ", " Pp P   ", "  P Q PP", "  B NP  ",
        "     K  ",
    ];

    #[test]
    fn test_round_trip_rows() {
        let pos = Position::from_rows(&MIDGAME).unwrap();
        assert_eq!(pos.to_rows(), MIDGAME.map(String::from));
    }

    #[test]
    fn test_parse_piece_placement() {
        let pos = Position::from_rows(&MIDGAME).unwrap();
        assert_eq!(pos.king_square(Color::Black), Square::new(6, 0));
        assert_eq!(pos.king_square(Color::White), Square::new(5, 7));
        assert!(pos.piece_at(3, 1).unwrap().is(PieceKind::Queen, Color::Black));
        assert!(pos.piece_at(4, 5).unwrap().is(PieceKind::Queen, Color::White));
    }

    #[test]
    fn test_too_many_rows() {
        let mut rows = MIDGAME.to_vec();
        rows.push("        ");
        assert_eq!(Position::from_rows(&rows), Err(BoardTextError::TooManyRows(9)));
    }

    #[test]
    fn test_missing_rows() {
        let rows = &MIDGAME[..7];
        assert_eq!(Position::from_rows(rows), Err(BoardTextError::MissingRows(7)));
    }

    #[test]
    fn test_row_length() {
        let mut rows = MIDGAME.to_vec();
        rows[2] = "p    n";
        assert_eq!(
            Position::from_rows(&rows),
            Err(BoardTextError::RowLength { row: 2, len: 6 })
        );
    }

    #[test]
    fn test_unknown_piece() {
        let mut rows = MIDGAME.to_vec();
        rows[7] = "     K x";
        assert_eq!(
            Position::from_rows(&rows),
            Err(BoardTextError::UnknownPiece {
                row: 7,
                col: 7,
                ch: 'x'
            })
        );
    }

    #[test]
    fn test_serde_json_round_trip() {
        let pos = Position::from_rows(&MIDGAME).unwrap();
        let json = serde_json::to_string(&pos).unwrap();
        let text = serde_json::to_string(&MIDGAME).unwrap();
        assert_eq!(json, text);
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos);
    }

    #[test]
    fn test_serde_json_reports_format_error() {
        let err = serde_json::from_str::<Position>(r#"["KK"]"#).unwrap_err();
        assert!(err.to_string().contains("Expected 8 rows"), "{err}");
    }
}
