//! 指し手生成モジュール
//!
//! - `reach`: 駒種ごとの利き升生成（駒種で引く関数テーブル）
//! - `Expansion`: 疑似合法手の遅延列挙（自玉の安全は確認しない）
//! - `Rules`: 探索コアが使う局面展開の境界（`ChessRules` が標準実装）
//!
//! 自殺手は除外しない。負けは後続局面で自玉が取られていることで検出される。

mod expansion;
mod reach;
mod rules;

pub use expansion::{Expansion, expand, has_lost};
pub use reach::{ReachList, reach};
pub use rules::{ChessRules, Rules};
