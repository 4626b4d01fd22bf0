//! 局面表現モジュール
//!
//! - `Position`: 8×8 の盤面配列（手番は持たず、呼び出し側が `Color` を併せて渡す）
//! - 盤面テキスト（8文字×8行）との相互変換と serde 対応
//! - `Zobrist`: 局面指紋（64bit）用の乱数テーブル
//!
//! `Position` は値型で、指し手の適用は新しい `Position` を返す。

mod board_text;
mod pos;
mod zobrist;

pub use board_text::{BoardTextError, ROWS};
pub use pos::Position;
pub use zobrist::{zobrist_psq, zobrist_side};
