//! 静的評価
//!
//! 駒の素点に、利きが届く升の駒に応じた加点を足す。
//! 敵駒に届けば `TAKES`、自駒に届けば `PROTECT`、空き升は Empty 列（10点）を引く。

use crate::movegen::{ReachList, reach};
use crate::position::Position;
use crate::types::{Color, PieceKind, Square};

/// 攻め点 [攻める駒種][取られる駒種]
const TAKES: [[i32; PieceKind::NUM]; PieceKind::NUM] = [
    [0, 0, 0, 0, 0, 0, 0],
    [10, 50, 80, 100, 100, 200, 100],
    [10, 20, 50, 30, 30, 200, 100],
    [10, 30, 80, 40, 40, 200, 100],
    [10, 30, 80, 40, 40, 200, 100],
    [10, 30, 30, 30, 30, 30, 30],
    [10, 20, 50, 30, 30, 200, 100],
];

/// 守り点 [守る駒種][守られる駒種]
const PROTECT: [[i32; PieceKind::NUM]; PieceKind::NUM] = [
    [0, 0, 0, 0, 0, 0, 0],
    [10, 30, 20, 20, 20, 0, 20],
    [10, 30, 20, 30, 30, 0, 20],
    [10, 30, 20, 30, 30, 0, 20],
    [10, 30, 20, 30, 30, 0, 20],
    [10, 30, 30, 30, 30, 0, 20],
    [10, 30, 30, 30, 30, 0, 20],
];

/// `color` から見た盤面点
///
/// 自駒の素点と利きの加点の和から、相手の駒の素点を引く。
pub fn board_score(pos: &Position, color: Color) -> i32 {
    let mut score = 0;
    let mut targets = ReachList::new();
    for sq in Square::all() {
        let pc = pos.piece_on(sq);
        if pc.is_none() {
            continue;
        }
        if !pc.is_color(color) {
            score -= pc.kind().value();
            continue;
        }

        let kind = pc.kind();
        score += kind.value();
        targets.clear();
        reach(pos, sq, &mut targets);
        for &to in &targets {
            let other = pos.piece_on(to);
            let table = if other.is_color(color) { &PROTECT } else { &TAKES };
            score += table[kind.index()][other.kind().index()];
        }
    }
    score
}

/// `side` の手番から見た静的評価値（正なら `side` 有利）
#[inline]
pub fn evaluate(pos: &Position, side: Color) -> i32 {
    board_score(pos, side) - board_score(pos, !side)
}
