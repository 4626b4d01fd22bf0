//! 利き升生成
//!
//! 駒が「届く」升を列挙する。自駒のいる升も含む（評価の守り点、キャスリング判定で使う）。
//! 駒種ごとの生成関数は `PieceKind` を添字とするテーブルで引く。

use smallvec::SmallVec;

use crate::position::Position;
use crate::types::{Color, PieceKind, Square};

/// 利き升リスト（クイーンの最大 27 升が収まる）
pub type ReachList = SmallVec<[Square; 32]>;

type ReachFn = fn(&Position, Square, Color, &mut ReachList);

/// 駒種 → 利き生成関数
const REACH_TABLE: [ReachFn; PieceKind::NUM] = [
    reach_none,   // Empty
    reach_pawn,   // Pawn
    reach_rook,   // Rook
    reach_bishop, // Bishop
    reach_knight, // Knight
    reach_king,   // King
    reach_queen,  // Queen
];

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (-1, -1), (-1, 1), (1, -1)];
const KNIGHT_STEPS: [(i8, i8); 8] =
    [(1, 2), (1, -2), (-1, 2), (-1, -2), (2, 1), (2, -1), (-2, 1), (-2, -1)];
const KING_STEPS: [(i8, i8); 8] =
    [(1, 1), (1, -1), (-1, 1), (-1, -1), (1, 0), (-1, 0), (0, 1), (0, -1)];

/// `from` にある駒の利き升を `out` に追加する
#[inline]
pub fn reach(pos: &Position, from: Square, out: &mut ReachList) {
    let pc = pos.piece_on(from);
    REACH_TABLE[pc.kind().index()](pos, from, pc.color(), out);
}

fn reach_none(_: &Position, _: Square, _: Color, _: &mut ReachList) {}

fn slide(pos: &Position, from: Square, dirs: &[(i8, i8)], out: &mut ReachList) {
    for &(dx, dy) in dirs {
        let mut cur = from.offset(dx, dy);
        while let Some(sq) = cur {
            out.push(sq);
            if !pos.piece_on(sq).is_none() {
                break;
            }
            cur = sq.offset(dx, dy);
        }
    }
}

fn step(from: Square, steps: &[(i8, i8)], out: &mut ReachList) {
    out.extend(steps.iter().filter_map(|&(dx, dy)| from.offset(dx, dy)));
}

fn reach_rook(pos: &Position, from: Square, _: Color, out: &mut ReachList) {
    slide(pos, from, &ROOK_DIRS, out);
}

fn reach_bishop(pos: &Position, from: Square, _: Color, out: &mut ReachList) {
    slide(pos, from, &BISHOP_DIRS, out);
}

fn reach_queen(pos: &Position, from: Square, _: Color, out: &mut ReachList) {
    slide(pos, from, &BISHOP_DIRS, out);
    slide(pos, from, &ROOK_DIRS, out);
}

fn reach_knight(_: &Position, from: Square, _: Color, out: &mut ReachList) {
    step(from, &KNIGHT_STEPS, out);
}

fn reach_king(_: &Position, from: Square, _: Color, out: &mut ReachList) {
    step(from, &KING_STEPS, out);
}

/// ポーンの前進方向（白は y が減る方向）
#[inline]
const fn pawn_dir(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// 2升前進できる初期行
#[inline]
const fn pawn_start_row(color: Color) -> i8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// アンパッサンで取れる行
#[inline]
pub(crate) const fn pawn_passing_row(color: Color) -> i8 {
    match color {
        Color::White => 3,
        Color::Black => 4,
    }
}

/// 次の前進で成る行
#[inline]
pub(crate) const fn pawn_promote_row(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

fn reach_pawn(pos: &Position, from: Square, color: Color, out: &mut ReachList) {
    let dy = pawn_dir(color);

    if let Some(one) = from.offset(0, dy)
        && pos.piece_on(one).is_none()
    {
        out.push(one);
        if from.y() == pawn_start_row(color)
            && let Some(two) = from.offset(0, 2 * dy)
            && pos.piece_on(two).is_none()
        {
            out.push(two);
        }
    }

    for dx in [1, -1] {
        let Some(diag) = from.offset(dx, dy) else {
            continue;
        };
        if !pos.piece_on(diag).is_none() {
            out.push(diag);
        } else if from.y() == pawn_passing_row(color) {
            // 横に敵ポーンがいれば空き升でも取れる（アンパッサン）
            let beside = pos.piece_at(diag.x(), from.y());
            if beside.is_some_and(|pc| pc.is(PieceKind::Pawn, !color)) {
                out.push(diag);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    fn sq(x: i8, y: i8) -> Square {
        Square::new(x, y).unwrap()
    }

    fn reach_of(pos: &Position, from: Square) -> ReachList {
        let mut out = ReachList::new();
        reach(pos, from, &mut out);
        out
    }

    #[test]
    fn test_knight_center_and_corner() {
        let mut pos = Position::empty();
        pos.put_piece(sq(3, 3), Piece::new(PieceKind::Knight, Color::White));
        pos.put_piece(sq(0, 0), Piece::new(PieceKind::Knight, Color::Black));
        assert_eq!(reach_of(&pos, sq(3, 3)).len(), 8);
        assert_eq!(reach_of(&pos, sq(0, 0)).len(), 2);
    }

    #[test]
    fn test_king_corner() {
        let mut pos = Position::empty();
        pos.put_piece(sq(7, 7), Piece::new(PieceKind::King, Color::White));
        assert_eq!(reach_of(&pos, sq(7, 7)).len(), 3);
    }

    #[test]
    fn test_slider_stops_on_first_piece() {
        let mut pos = Position::empty();
        pos.put_piece(sq(0, 0), Piece::new(PieceKind::Rook, Color::White));
        pos.put_piece(sq(0, 3), Piece::new(PieceKind::Pawn, Color::White));
        pos.put_piece(sq(2, 0), Piece::new(PieceKind::Pawn, Color::Black));
        let r = reach_of(&pos, sq(0, 0));
        // 右: (1,0),(2,0) / 下: (0,1),(0,2),(0,3)
        assert_eq!(r.len(), 5);
        assert!(r.contains(&sq(2, 0)));
        assert!(r.contains(&sq(0, 3)));
        assert!(!r.contains(&sq(0, 4)));
    }

    #[test]
    fn test_queen_open_board() {
        let mut pos = Position::empty();
        pos.put_piece(sq(3, 3), Piece::new(PieceKind::Queen, Color::Black));
        assert_eq!(reach_of(&pos, sq(3, 3)).len(), 27);
    }

    #[test]
    fn test_pawn_double_step_and_captures() {
        let mut pos = Position::empty();
        pos.put_piece(sq(4, 6), Piece::new(PieceKind::Pawn, Color::White));
        pos.put_piece(sq(3, 5), Piece::new(PieceKind::Knight, Color::Black));
        let r = reach_of(&pos, sq(4, 6));
        assert_eq!(r.as_slice(), &[sq(4, 5), sq(4, 4), sq(3, 5)]);
    }

    #[test]
    fn test_pawn_blocked() {
        let mut pos = Position::empty();
        pos.put_piece(sq(4, 1), Piece::new(PieceKind::Pawn, Color::Black));
        pos.put_piece(sq(4, 2), Piece::new(PieceKind::Pawn, Color::White));
        let r = reach_of(&pos, sq(4, 1));
        assert!(r.is_empty());
    }

    #[test]
    fn test_pawn_en_passant_reach() {
        let mut pos = Position::empty();
        pos.put_piece(sq(4, 3), Piece::new(PieceKind::Pawn, Color::White));
        pos.put_piece(sq(5, 3), Piece::new(PieceKind::Pawn, Color::Black));
        let r = reach_of(&pos, sq(4, 3));
        assert_eq!(r.as_slice(), &[sq(4, 2), sq(5, 2)]);
    }
}
