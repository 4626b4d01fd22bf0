//! 局面展開の境界

use super::expansion::{Expansion, has_lost};
use crate::eval;
use crate::position::Position;
use crate::types::{Color, Move};

/// ゲーム規則
///
/// リンカーは局面の中身を知らず、このトレイト越しに子局面・勝敗・静的評価を得る。
/// 同じ入力には常に同じ順序で同じ結果を返すこと。
pub trait Rules: Send + Sync {
    /// `side` の手番で指せる手と指した後の局面を列挙する
    fn expand<'a>(
        &'a self,
        pos: &'a Position,
        side: Color,
    ) -> Box<dyn Iterator<Item = (Move, Position)> + 'a>;

    /// `side` が既に負けている
    fn has_lost(&self, pos: &Position, side: Color) -> bool;

    /// `side` から見た静的評価値（正なら有利）
    fn evaluate(&self, pos: &Position, side: Color) -> i32;
}

/// 標準のチェス規則（疑似合法手、キング取りで決着）
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessRules;

impl Rules for ChessRules {
    fn expand<'a>(
        &'a self,
        pos: &'a Position,
        side: Color,
    ) -> Box<dyn Iterator<Item = (Move, Position)> + 'a> {
        Box::new(Expansion::new(pos, side))
    }

    #[inline]
    fn has_lost(&self, pos: &Position, side: Color) -> bool {
        has_lost(pos, side)
    }

    #[inline]
    fn evaluate(&self, pos: &Position, side: Color) -> i32 {
        eval::evaluate(pos, side)
    }
}
