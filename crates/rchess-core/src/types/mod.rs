//! 基本型モジュール
//!
//! - `Color`: 手番（白/黒）
//! - `Square`: 升（x, y とも 0..8）
//! - `PieceKind` / `Piece`: 駒種と駒
//! - `Move`: 指し手キー（移動元・移動先・ナイト成りフラグ）

mod color;
mod moves;
mod piece;
mod square;

pub use color::Color;
pub use moves::Move;
pub use piece::{Piece, PieceKind};
pub use square::Square;
