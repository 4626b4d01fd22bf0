//! # rchess-core
//!
//! 8×8 のチェス系ゲームを対象にした、ティック予算制の遅延ゲーム木リンカー。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, Square, PieceKind, Piece, Move）
//! - `position`: 局面表現、盤面テキスト、Zobrist 指紋
//! - `movegen`: 疑似合法手の列挙と `Rules` 境界
//! - `eval`: 静的評価
//! - `linker`: ノードストア、ティック配分、重みの再評価、指し手選択
//!

// 基本型
pub mod types;

// 盤面表現
pub mod position;

// 指し手生成
pub mod movegen;

// 静的評価
pub mod eval;

// リンカー本体
pub mod linker;

pub use linker::{Linker, LinkerParams};
pub use position::Position;
pub use types::{Color, Move};
