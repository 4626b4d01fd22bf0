//! Zobristハッシュ

use crate::types::{Piece, Square};

/// Zobristハッシュ用乱数テーブル
pub struct Zobrist {
    /// 手番用（白番のときに XOR する）
    pub side: u64,
    /// 駒×升 [Piece.code()][Square.index()]
    pub psq: [[u64; Square::NUM]; Piece::CODE_NUM],
}

impl Zobrist {
    /// テーブル初期化
    pub const fn init() -> Self {
        let mut zobrist = Zobrist {
            side: 0,
            psq: [[0; Square::NUM]; Piece::CODE_NUM],
        };

        // XorShift64で疑似乱数生成
        let mut seed = 0x9E37_79B9_7F4A_7C15u64;

        // 手番用
        seed = xorshift64(seed);
        zobrist.side = seed;

        // 駒×升
        // code == 0 (Piece::NONE) は常に0を保つためスキップ
        let mut pc = 1;
        while pc < Piece::CODE_NUM {
            let mut sq = 0;
            while sq < Square::NUM {
                seed = xorshift64(seed);
                zobrist.psq[pc][sq] = seed;
                sq += 1;
            }
            pc += 1;
        }

        zobrist
    }
}

/// XorShift64疑似乱数生成（const fn対応）
const fn xorshift64(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

/// グローバルZobristテーブル
pub static ZOBRIST: Zobrist = Zobrist::init();

/// 駒と升のハッシュを取得
#[inline]
pub fn zobrist_psq(pc: Piece, sq: Square) -> u64 {
    ZOBRIST.psq[pc.code()][sq.index()]
}

/// 手番のハッシュを取得
#[inline]
pub fn zobrist_side() -> u64 {
    ZOBRIST.side
}
