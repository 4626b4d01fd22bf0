//! 疑似合法手の遅延列挙

use std::iter::FusedIterator;

use super::reach::{ReachList, pawn_passing_row, pawn_promote_row, reach};
use crate::position::Position;
use crate::types::{Color, Move, Piece, PieceKind, Square};

/// 自陣の最下段（白は y=7、黒は y=0）
#[inline]
const fn back_row(color: Color) -> i8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// `side` のキングがもう盤上にない
#[inline]
pub fn has_lost(pos: &Position, side: Color) -> bool {
    pos.king_square(side).is_none()
}

/// `side` の疑似合法手を列挙するイテレータを作る
#[inline]
pub fn expand(pos: &Position, side: Color) -> Expansion<'_> {
    Expansion::new(pos, side)
}

/// 疑似合法手の遅延列挙
///
/// 自駒を行優先で走査し、駒ごとに利き升を `ReachList` に展開してから1手ずつ返す。
/// 次の駒へ進むのは現在の駒の利き升を使い切ってから。
/// 作り直せば同じ順序で同じ手を返す。
pub struct Expansion<'a> {
    pos: &'a Position,
    side: Color,
    /// 次に調べる升のインデックス
    cursor: usize,
    from: Square,
    targets: ReachList,
    next_target: usize,
    /// ナイト成りの保留分（クイーン成りの直後に返す）
    queued: Option<(Move, Position)>,
}

impl<'a> Expansion<'a> {
    pub fn new(pos: &'a Position, side: Color) -> Self {
        Expansion {
            pos,
            side,
            cursor: 0,
            from: Square::from_index(0),
            targets: ReachList::new(),
            next_target: 0,
            queued: None,
        }
    }

    /// 次の自駒へ進み、その利き升を読み込む。駒がなければ false
    fn advance_piece(&mut self) -> bool {
        while self.cursor < Square::NUM {
            let sq = Square::from_index(self.cursor);
            self.cursor += 1;
            if self.pos.piece_on(sq).is_color(self.side) {
                self.from = sq;
                self.targets.clear();
                self.next_target = 0;
                reach(self.pos, sq, &mut self.targets);
                return true;
            }
        }
        false
    }

    /// `from` → `to` から生じる手（0〜2手）。2手目は `queued` に積む
    fn develop(&mut self, from: Square, to: Square) -> Option<(Move, Position)> {
        let pos = self.pos;
        let side = self.side;
        let piece = pos.piece_on(from);
        let target = pos.piece_on(to);

        match piece.kind() {
            PieceKind::Rook if target.is(PieceKind::King, side) => {
                castle(pos, side, from, to)
            }
            PieceKind::Pawn => self.develop_pawn(from, to, target),
            _ => plain(pos, side, from, to),
        }
    }

    fn develop_pawn(&mut self, from: Square, to: Square, target: Piece) -> Option<(Move, Position)> {
        let pos = self.pos;
        let side = self.side;
        if target.is_color(side) {
            return None;
        }

        if from.y() == pawn_promote_row(side) {
            let mut queen = pos.with_move(from, to);
            queen.put_piece(to, Piece::new(PieceKind::Queen, side));
            let mut knight = queen;
            knight.put_piece(to, Piece::new(PieceKind::Knight, side));
            self.queued = Some((Move::new(from, to, true), knight));
            return Some((Move::new(from, to, false), queen));
        }

        if from.y() == pawn_passing_row(side) && target.is_none() && to.x() != from.x() {
            let mut next = pos.with_move(from, to);
            if let Some(passed) = Square::new(to.x(), from.y()) {
                next.put_piece(passed, Piece::NONE);
            }
            return Some((Move::new(from, to, false), next));
        }

        Some((Move::new(from, to, false), pos.with_move(from, to)))
    }
}

/// 通常の移動（自駒の升へは動けない）
fn plain(pos: &Position, side: Color, from: Square, to: Square) -> Option<(Move, Position)> {
    if pos.piece_on(to).is_color(side) {
        return None;
    }
    Some((Move::new(from, to, false), pos.with_move(from, to)))
}

/// 隅のルークから同じ段の初期位置のキングへ利きが通っていればキャスリング
///
/// キーはルーク升 → キング升。チェック中・通過升への利きは確認しない。
fn castle(pos: &Position, side: Color, rook: Square, king: Square) -> Option<(Move, Position)> {
    let row = back_row(side);
    let rook_home = (rook.x() == 0 || rook.x() == 7) && rook.y() == row;
    let king_home = king.x() == 4 && king.y() == row;
    if !rook_home || !king_home {
        return None;
    }

    let (rook_x, king_x) = if rook.x() < king.x() { (3, 2) } else { (5, 6) };
    let rook_to = Square::new(rook_x, row)?;
    let king_to = Square::new(king_x, row)?;
    let next = pos.with_move(rook, rook_to).with_move(king, king_to);
    Some((Move::new(rook, king, false), next))
}

impl Iterator for Expansion<'_> {
    type Item = (Move, Position);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.queued.take() {
                return Some(entry);
            }
            if self.next_target < self.targets.len() {
                let to = self.targets[self.next_target];
                self.next_target += 1;
                if let Some(entry) = self.develop(self.from, to) {
                    return Some(entry);
                }
                continue;
            }
            if !self.advance_piece() {
                return None;
            }
        }
    }
}

impl FusedIterator for Expansion<'_> {}
