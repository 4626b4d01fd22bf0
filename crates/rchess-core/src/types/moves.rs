//! 指し手キー（Move）

use super::Square;

/// 指し手キー（16bit）
///
/// - bit 0-2:  移動先の行 (to.y)
/// - bit 3-5:  移動先の列 (to.x)
/// - bit 6-8:  移動元の行 (from.y)
/// - bit 9-11: 移動元の列 (from.x)
/// - bit 12:   ナイト成りフラグ
///
/// 同一局面から生成される指し手同士では衝突しない。
/// キャスリングは「ルークの升 → キングの升」、クイーン成りはフラグなしで表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Move(u16);

impl Move {
    const MASK3: u16 = 0x7;
    const TO_X_SHIFT: u16 = 3;
    const FROM_Y_SHIFT: u16 = 6;
    const FROM_X_SHIFT: u16 = 9;
    const KNIGHT_FLAG: u16 = 1 << 12;

    /// 指し手を生成
    #[inline]
    pub const fn new(from: Square, to: Square, promote_knight: bool) -> Move {
        let mut m = (to.y() as u16 & Self::MASK3)
            | ((to.x() as u16 & Self::MASK3) << Self::TO_X_SHIFT)
            | ((from.y() as u16 & Self::MASK3) << Self::FROM_Y_SHIFT)
            | ((from.x() as u16 & Self::MASK3) << Self::FROM_X_SHIFT);
        if promote_knight {
            m |= Self::KNIGHT_FLAG;
        }
        Move(m)
    }

    /// 生の値から復元
    #[inline]
    pub const fn from_raw(raw: u16) -> Move {
        Move(raw)
    }

    /// 生の値を取得
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// 移動元
    #[inline]
    pub const fn from(self) -> Square {
        let x = ((self.0 >> Self::FROM_X_SHIFT) & Self::MASK3) as usize;
        let y = ((self.0 >> Self::FROM_Y_SHIFT) & Self::MASK3) as usize;
        Square::from_index(y * 8 + x)
    }

    /// 移動先
    #[inline]
    pub const fn to(self) -> Square {
        let x = ((self.0 >> Self::TO_X_SHIFT) & Self::MASK3) as usize;
        let y = (self.0 & Self::MASK3) as usize;
        Square::from_index(y * 8 + x)
    }

    /// ナイト成りかどうか
    #[inline]
    pub const fn is_promote_knight(self) -> bool {
        self.0 & Self::KNIGHT_FLAG != 0
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.from(), self.to())?;
        if self.is_promote_knight() {
            write!(f, "=N")?;
        }
        Ok(())
    }
}

impl serde::Serialize for Move {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_move_key_injective_and_decodable() {
        let mut seen = HashSet::new();
        for from in Square::all() {
            for to in Square::all() {
                for flag in [false, true] {
                    let m = Move::new(from, to, flag);
                    assert!(seen.insert(m.raw()), "duplicate key for {from}->{to} {flag}");
                    assert_eq!(m.from(), from);
                    assert_eq!(m.to(), to);
                    assert_eq!(m.is_promote_knight(), flag);
                }
            }
        }
        assert_eq!(seen.len(), Square::NUM * Square::NUM * 2);
    }

    #[test]
    fn test_move_raw_round_trip() {
        let m = Move::new(Square::new(1, 1).unwrap(), Square::new(2, 0).unwrap(), true);
        assert_eq!(Move::from_raw(m.raw()), m);
    }

    #[test]
    fn test_move_display() {
        let m = Move::new(Square::new(4, 6).unwrap(), Square::new(4, 4).unwrap(), false);
        assert_eq!(m.to_string(), "(4,6)->(4,4)");
        let p = Move::new(Square::new(0, 1).unwrap(), Square::new(0, 0).unwrap(), true);
        assert_eq!(p.to_string(), "(0,1)->(0,0)=N");
    }
}
