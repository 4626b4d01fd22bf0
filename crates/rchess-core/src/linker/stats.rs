//! ストアの集計と枝の診断表示

use std::fmt;

use serde::Serialize;

use super::node::NodeState;
use super::store::NodeStore;
use crate::types::Move;

/// ストア全体の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total: usize,
    pub defined: usize,
    pub linked: usize,
    pub won: usize,
    pub lost: usize,
    /// 展開したが指し手がなかったノード
    pub exhausted: usize,
    /// 全ノードの `tick_processed` の和
    pub ticks_processed: u64,
}

impl StoreStats {
    pub fn collect<S: NodeStore>(store: &S) -> Self {
        let mut stats = Self::default();
        store.each(|_, node| {
            stats.total += 1;
            match node.state {
                NodeState::Defined => stats.defined += 1,
                NodeState::Linked => stats.linked += 1,
                NodeState::Won => stats.won += 1,
                NodeState::Lost => stats.lost += 1,
            }
            if node.exhausted {
                stats.exhausted += 1;
            }
            stats.ticks_processed += node.tick_processed;
        });
        stats
    }
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes={} (defined={} linked={} won={} lost={} exhausted={}) ticks={}",
            self.total,
            self.defined,
            self.linked,
            self.won,
            self.lost,
            self.exhausted,
            self.ticks_processed
        )
    }
}

/// 枝1本の診断情報
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TurnReport {
    pub mv: Move,
    pub turn_weight: f64,
    /// 子ノードの評価済み重み
    pub target_weight: f64,
    pub target_static: i32,
    pub target_processed: u64,
}

impl fmt::Display for TurnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<14} turn={:9.3} node={:9.3} static={:5} processed={}",
            self.mv.to_string(),
            self.turn_weight,
            self.target_weight,
            self.target_static,
            self.target_processed
        )
    }
}
