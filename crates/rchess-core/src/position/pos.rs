//! 局面本体

use super::zobrist::{zobrist_psq, zobrist_side};
use crate::types::{Color, Piece, PieceKind, Square};

/// 局面
///
/// 盤面配列のみを持つ。手番は `Node` 側で管理し、指紋計算時に渡す。
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Piece; Square::NUM],
}

impl Position {
    /// 空の盤面
    pub const fn empty() -> Position {
        Position {
            board: [Piece::NONE; Square::NUM],
        }
    }

    /// 升上の駒
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.board[sq.index()]
    }

    /// 座標から駒を取得（盤外は None）
    #[inline]
    pub fn piece_at(&self, x: i8, y: i8) -> Option<Piece> {
        Square::new(x, y).map(|sq| self.piece_on(sq))
    }

    /// 升に駒を置く（空き升なら駒を取り除く）
    #[inline]
    pub fn put_piece(&mut self, sq: Square, pc: Piece) {
        self.board[sq.index()] = pc;
    }

    /// `from` の駒を `to` へ動かした局面を返す（`to` の駒は取られる）
    pub fn with_move(&self, from: Square, to: Square) -> Position {
        let mut out = *self;
        let pc = out.piece_on(from);
        out.put_piece(from, Piece::NONE);
        out.put_piece(to, pc);
        out
    }

    /// `color` の駒がある升を行優先で列挙
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.piece_on(sq).is_color(color))
    }

    /// `color` のキングの升（最初に見つかったもの）
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.piece_on(sq).is(PieceKind::King, color))
    }

    /// 駒の総数
    pub fn piece_count(&self) -> usize {
        self.board.iter().filter(|pc| !pc.is_none()).count()
    }

    /// 局面指紋（Zobrist）
    ///
    /// 同じ盤面・手番に対して常に同じ値を返す。衝突がないことは保証しない。
    pub fn fingerprint(&self, side: Color) -> u64 {
        let mut key = if side.is_white() { zobrist_side() } else { 0 };
        for sq in Square::all() {
            let pc = self.piece_on(sq);
            if !pc.is_none() {
                key ^= zobrist_psq(pc, sq);
            }
        }
        key
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::empty()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "[{row}]")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.to_rows()).finish()
    }
}
