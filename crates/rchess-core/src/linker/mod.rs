//! 遅延ゲーム木リンカー
//!
//! ティック（抽象的な計算予算）を注入しながら少しずつ木を展開し、
//! いつでも最善と思われる手を返せるように局面ごとの重みを保持する。
//!
//! - `Node`/`Turn`: 局面ごとの記録と子局面への枝
//! - `NodeStore`: 指紋 → ノードの写像（既定は `RamStore`）
//! - `factory`: ノードの唯一の生成箇所
//! - `scheduler`: ティック配分と展開
//! - `evaluator`: 重みの再評価
//! - `selector`: 最小重みの枝の選択
//!
//! 重みはノードの手番側から見た値で `[LOST_WEIGHT, WIN_WEIGHT]` に収まる。
//! 枝の重みは子ノードの重みなので、枝の持ち主にとっては小さいほど良い。

mod evaluator;
mod factory;
mod node;
mod params;
mod scheduler;
mod selector;
mod stats;
mod store;

use std::sync::atomic::{AtomicU64, Ordering};

pub use evaluator::reevaluate;
pub use factory::{create_node, get_node};
pub use node::{Node, NodeState, Turn};
pub use params::{LinkerParams, ParamsError};
pub use scheduler::propagate_ticks;
pub use selector::{Selection, best_turn, select_turn};
pub use stats::{StoreStats, TurnReport};
pub use store::{DEFAULT_SHARDS, NodeStore, RamStore};

use crate::movegen::{ChessRules, Rules};
use crate::position::Position;
use crate::types::Color;

/// 負け確定の重み
pub const LOST_WEIGHT: f64 = 1.0;
/// 勝ち確定の重み
pub const WIN_WEIGHT: f64 = 10_000.0;
/// 重みの広がりの下限（0 除算回避）
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// 相手側から見た重みへ変換
#[inline]
pub fn mirror(weight: f64) -> f64 {
    LOST_WEIGHT + WIN_WEIGHT - weight
}

/// スケジューラ・評価器が使う共有ハンドル
pub struct LinkContext<'a, S: NodeStore, R: Rules> {
    pub store: &'a S,
    pub rules: &'a R,
    pub params: &'a LinkerParams,
    epoch: &'a AtomicU64,
}

impl<'a, S: NodeStore, R: Rules> LinkContext<'a, S, R> {
    pub fn new(store: &'a S, rules: &'a R, params: &'a LinkerParams, epoch: &'a AtomicU64) -> Self {
        Self {
            store,
            rules,
            params,
            epoch,
        }
    }

    /// 新しい評価パス番号（1 から始まる）
    #[inline]
    pub fn next_epoch(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// ストア・規則・パラメータをまとめて持つ窓口
pub struct Linker<S: NodeStore = RamStore, R: Rules = ChessRules> {
    store: S,
    rules: R,
    params: LinkerParams,
    epoch: AtomicU64,
}

impl Linker {
    /// `RamStore` と `ChessRules` で作成
    pub fn new(params: LinkerParams) -> Result<Self, ParamsError> {
        Self::with_parts(RamStore::new(params.store_shards), ChessRules, params)
    }
}

impl<S: NodeStore, R: Rules> Linker<S, R> {
    pub fn with_parts(store: S, rules: R, params: LinkerParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            store,
            rules,
            params,
            epoch: AtomicU64::new(0),
        })
    }

    #[inline]
    pub fn context(&self) -> LinkContext<'_, S, R> {
        LinkContext::new(&self.store, &self.rules, &self.params, &self.epoch)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn params(&self) -> &LinkerParams {
        &self.params
    }

    /// ノードを取得（なければ作る）
    pub fn get_node(&self, pos: &Position, side: Color) -> Node {
        get_node(&self.context(), pos, side)
    }

    pub fn propagate_ticks(&self, ticks: u64, pos: &Position, side: Color) {
        propagate_ticks(&self.context(), ticks, pos, side);
    }

    pub fn reevaluate(&self, pos: &Position, side: Color) -> f64 {
        reevaluate(&self.context(), pos, side)
    }

    pub fn select_turn(&self, pos: &Position, side: Color) -> Option<Selection> {
        select_turn(&self.context(), pos, side)
    }

    /// 勝敗が確定しているか
    pub fn is_terminal(&self, pos: &Position, side: Color) -> bool {
        self.get_node(pos, side).is_terminal()
    }

    /// 全ノードを破棄（独立した探索の間で使う）
    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats::collect(&self.store)
    }

    /// 各枝の重みと子ノードの状態
    pub fn turn_report(&self, pos: &Position, side: Color) -> Vec<TurnReport> {
        let node = self.get_node(pos, side);
        node.turns
            .iter()
            .filter_map(|turn| {
                let target = self.store.get(turn.target)?;
                Some(TurnReport {
                    mv: turn.mv,
                    turn_weight: turn.weight,
                    target_weight: target.weight,
                    target_static: target.static_weight,
                    target_processed: target.tick_processed,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Position {
        Position::from_rows(rows).unwrap()
    }

    #[test]
    fn test_mirror() {
        assert_eq!(mirror(LOST_WEIGHT), WIN_WEIGHT);
        assert_eq!(mirror(WIN_WEIGHT), LOST_WEIGHT);
        assert_eq!(mirror(mirror(1234.5)), 1234.5);
    }

    #[test]
    fn test_new_rejects_invalid_params() {
        let params = LinkerParams {
            link_cost: 0,
            ..LinkerParams::default()
        };
        assert_eq!(Linker::new(params).err(), Some(ParamsError::ZeroLinkCost));
    }

    #[test]
    fn test_epoch_is_monotonic() {
        let linker = Linker::new(LinkerParams::default()).unwrap();
        let ctx = linker.context();
        assert_eq!(ctx.next_epoch(), 1);
        assert_eq!(ctx.next_epoch(), 2);
    }

    #[test]
    fn test_facade_round() {
        let linker = Linker::new(LinkerParams::default()).unwrap();
        let pos = board(&["    k   ", "        ", "        ", "        ", "        ", "        ", "        ", "    K   "]);
        assert!(!linker.is_terminal(&pos, Color::White));
        assert!(linker.select_turn(&pos, Color::White).is_none());

        linker.propagate_ticks(100, &pos, Color::White);
        linker.reevaluate(&pos, Color::White);
        let report = linker.turn_report(&pos, Color::White);
        assert_eq!(report.len(), 5);

        let selection = linker.select_turn(&pos, Color::White).unwrap();
        let min = report.iter().map(|r| r.turn_weight).fold(f64::INFINITY, f64::min);
        assert_eq!(selection.weight, min);
        assert_eq!(selection.side, Color::Black);

        let stats = linker.stats();
        assert_eq!(stats.total, 6);
        assert_eq!(stats.linked, 1);
        assert_eq!(stats.ticks_processed, 100);

        linker.clear();
        assert!(linker.store().is_empty());
    }
}
