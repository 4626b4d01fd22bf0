//! 升（Square）

/// 升
///
/// `x` は列（0..8、盤面文字列内の文字位置）、`y` は行（0..8、盤面文字列の並び順）。
/// 内部表現は `y * 8 + x`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// 升の数
    pub const NUM: usize = 64;
    /// 盤の一辺
    pub const SIDE: i8 = 8;

    /// 座標から生成（範囲外なら None）
    #[inline]
    pub const fn new(x: i8, y: i8) -> Option<Square> {
        if x >= 0 && x < Self::SIDE && y >= 0 && y < Self::SIDE {
            Some(Square((y * Self::SIDE + x) as u8))
        } else {
            None
        }
    }

    /// インデックスから生成
    ///
    /// `idx` は 0..64 であること。
    #[inline]
    pub const fn from_index(idx: usize) -> Square {
        debug_assert!(idx < Self::NUM);
        Square(idx as u8)
    }

    /// 列
    #[inline]
    pub const fn x(self) -> i8 {
        (self.0 % 8) as i8
    }

    /// 行
    #[inline]
    pub const fn y(self) -> i8 {
        (self.0 / 8) as i8
    }

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// (dx, dy) だけずらした升（盤外なら None）
    #[inline]
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Square> {
        Square::new(self.x() + dx, self.y() + dy)
    }

    /// 全升を行優先（(0,0), (1,0), ...）で列挙
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM).map(Square::from_index)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x(), self.y())
    }
}
