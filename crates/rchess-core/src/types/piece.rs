//! 駒種（PieceKind）と駒（Piece）

use super::Color;

/// 駒種
///
/// 空き升も1つの種として持つ閉じた列挙。利き生成・評価テーブルはこの値を添字に引く。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Empty = 0,
    Pawn = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    King = 5,
    Queen = 6,
}

impl PieceKind {
    /// 種の数（Empty を含む）
    pub const NUM: usize = 7;

    /// 全駒種（Empty を除く）
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::King,
        PieceKind::Queen,
    ];

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    const fn from_u8(v: u8) -> PieceKind {
        match v {
            1 => PieceKind::Pawn,
            2 => PieceKind::Rook,
            3 => PieceKind::Bishop,
            4 => PieceKind::Knight,
            5 => PieceKind::King,
            6 => PieceKind::Queen,
            _ => PieceKind::Empty,
        }
    }

    /// 駒の素点
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Empty => 0,
            PieceKind::Pawn => 30,
            PieceKind::Rook => 100,
            PieceKind::Bishop => 50,
            PieceKind::Knight => 50,
            PieceKind::King => 100,
            PieceKind::Queen => 200,
        }
    }

    /// 白番の文字（大文字）
    #[inline]
    const fn letter(self) -> char {
        match self {
            PieceKind::Empty => ' ',
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
        }
    }
}

/// 駒
///
/// - bit 0-2: 駒種（0 は空き升）
/// - bit 3:   黒番フラグ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    /// 空き升
    pub const NONE: Piece = Piece(0);
    /// Zobrist テーブル用のコード数
    pub const CODE_NUM: usize = 16;

    const KIND_MASK: u8 = 0x07;
    const BLACK_FLAG: u8 = 0x08;

    /// 駒種と手番から生成
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        match kind {
            PieceKind::Empty => Piece::NONE,
            _ => match color {
                Color::White => Piece(kind as u8),
                Color::Black => Piece(kind as u8 | Self::BLACK_FLAG),
            },
        }
    }

    /// 駒種
    #[inline]
    pub const fn kind(self) -> PieceKind {
        PieceKind::from_u8(self.0 & Self::KIND_MASK)
    }

    /// 手番（空き升には意味を持たない）
    #[inline]
    pub const fn color(self) -> Color {
        if self.0 & Self::BLACK_FLAG != 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// 空き升かどうか
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// `color` の駒かどうか（空き升は false）
    #[inline]
    pub const fn is_color(self, color: Color) -> bool {
        !self.is_none() && self.color() as u8 == color as u8
    }

    /// 駒種が一致し、かつ `color` の駒かどうか
    #[inline]
    pub const fn is(self, kind: PieceKind, color: Color) -> bool {
        self.0 == Piece::new(kind, color).0
    }

    /// Zobrist 用のコード（0..16）
    #[inline]
    pub const fn code(self) -> usize {
        self.0 as usize
    }

    /// 盤面文字から生成（未知の文字は None）
    pub fn from_char(ch: char) -> Option<Piece> {
        if ch == ' ' {
            return Some(Piece::NONE);
        }
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match ch.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'R' => PieceKind::Rook,
            'B' => PieceKind::Bishop,
            'N' => PieceKind::Knight,
            'K' => PieceKind::King,
            'Q' => PieceKind::Queen,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }

    /// 盤面文字（白は大文字、黒は小文字、空き升は空白）
    pub fn to_char(self) -> char {
        let letter = self.kind().letter();
        match self.color() {
            Color::Black if !self.is_none() => letter.to_ascii_lowercase(),
            _ => letter,
        }
    }
}
