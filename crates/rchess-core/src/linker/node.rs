//! ノードと枝（Turn）

use serde::Serialize;

use super::{LOST_WEIGHT, WIN_WEIGHT};
use crate::position::Position;
use crate::types::{Color, Move};

/// ノードの状態
///
/// Defined → Linked、または Defined/Linked → Won/Lost の向きにしか進まない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// 生成済み・未展開
    Defined,
    /// 展開済み（`turns` が空でない）
    Linked,
    /// 手番側の勝ち（相手玉を取れる）
    Won,
    /// 手番側の負け（自玉がない）
    Lost,
}

impl NodeState {
    /// 勝敗が確定している
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, NodeState::Won | NodeState::Lost)
    }
}

/// 子局面への枝
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turn {
    pub mv: Move,
    /// 子ノードの指紋
    pub target: u64,
    /// 子ノードの重み（小さいほど枝の持ち主に有利）
    pub weight: f64,
    /// 最後に重みを更新した評価パスの番号
    pub refreshed: u64,
}

impl Turn {
    #[inline]
    pub const fn new(mv: Move, target: u64, weight: f64) -> Turn {
        Turn {
            mv,
            target,
            weight,
            refreshed: 0,
        }
    }

    /// 勝敗未確定の枝（ティック配分の対象）
    #[inline]
    pub fn is_open(&self) -> bool {
        self.weight > LOST_WEIGHT && self.weight < WIN_WEIGHT
    }
}

/// 局面ごとの探索記録
///
/// 重みは `side` から見た値で、`[LOST_WEIGHT, WIN_WEIGHT]` に収まる。
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: Position,
    pub side: Color,
    /// 局面固有の静的重み
    pub static_weight: i32,
    /// 評価器が書き込む重み
    pub weight: f64,
    pub state: NodeState,
    pub turns: Vec<Turn>,
    /// 未消化ティック
    pub tick_accumulated: u64,
    /// 消化済みティック（単調増加）
    pub tick_processed: u64,
    /// 展開したが指し手がなかった
    pub exhausted: bool,
    /// Won になったときの決め手
    pub winning_turn: Option<Turn>,
    /// `weight` を書いた評価パスの番号
    pub weight_epoch: u64,
}

impl Node {
    pub fn new(position: Position, side: Color, state: NodeState, static_weight: i32) -> Node {
        let mut node = Node {
            position,
            side,
            static_weight,
            weight: 0.0,
            state,
            turns: Vec::new(),
            tick_accumulated: 0,
            tick_processed: 0,
            exhausted: false,
            winning_turn: None,
            weight_epoch: 0,
        };
        node.weight = node.flat_weight();
        node
    }

    /// 再帰しない見積もり（勝敗確定なら番兵値、それ以外は静的重み）
    #[inline]
    pub fn flat_weight(&self) -> f64 {
        match self.state {
            NodeState::Won => WIN_WEIGHT,
            NodeState::Lost => LOST_WEIGHT,
            NodeState::Defined | NodeState::Linked => f64::from(self.static_weight),
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// 受け取ったティックの総量
    #[inline]
    pub fn ticks_received(&self) -> u64 {
        self.tick_accumulated + self.tick_processed
    }
}
