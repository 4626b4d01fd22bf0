//! 指し手の選択

use serde::Serialize;

use super::LinkContext;
use super::node::{Node, NodeState, Turn};
use super::store::NodeStore;
use crate::movegen::Rules;
use crate::position::Position;
use crate::types::{Color, Move};

/// 選ばれた手
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Selection {
    pub mv: Move,
    /// 指した後の局面
    pub position: Position,
    /// 指した後の手番
    pub side: Color,
    /// 枝の重み（小さいほど指した側に有利）
    pub weight: f64,
}

/// 最小重みの枝（同じ重みなら先にあるもの）
///
/// Won ノードは決め手を返す。
pub fn best_turn(node: &Node) -> Option<Turn> {
    if node.state == NodeState::Won {
        return node.winning_turn;
    }
    let mut best: Option<Turn> = None;
    for turn in &node.turns {
        if best.is_none_or(|b| turn.weight < b.weight) {
            best = Some(*turn);
        }
    }
    best
}

/// `pos`（手番 `side`）で指す手を選ぶ。ノードがないか枝がなければ None
pub fn select_turn<S: NodeStore, R: Rules>(
    ctx: &LinkContext<'_, S, R>,
    pos: &Position,
    side: Color,
) -> Option<Selection> {
    let node = ctx.store.get(pos.fingerprint(side))?;
    let turn = best_turn(&node)?;
    let target = ctx.store.get(turn.target)?;
    Some(Selection {
        mv: turn.mv,
        position: target.position,
        side: target.side,
        weight: turn.weight,
    })
}
