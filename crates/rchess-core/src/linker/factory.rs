//! ノードの生成
//!
//! ストアに新しいノードを作るのはここだけ。初回参照でノードの存在が確定する。

use super::node::{Node, NodeState};
use super::store::NodeStore;
use super::{LOST_WEIGHT, LinkContext, WIN_WEIGHT};
use crate::movegen::Rules;
use crate::position::Position;
use crate::types::Color;

/// 勝敗未確定ノードの静的重みの下限・上限（番兵値を避ける）
const MIN_STATIC: i32 = LOST_WEIGHT as i32 + 1;
const MAX_STATIC: i32 = WIN_WEIGHT as i32 - 1;

/// 局面からノードを組み立てる（ストアには触れない）
pub fn create_node<R: Rules>(rules: &R, eval_center: i32, pos: &Position, side: Color) -> Node {
    if rules.has_lost(pos, side) {
        return Node::new(*pos, side, NodeState::Lost, LOST_WEIGHT as i32);
    }
    if rules.has_lost(pos, !side) {
        return Node::new(*pos, side, NodeState::Won, WIN_WEIGHT as i32);
    }
    let weight = eval_center
        .saturating_add(rules.evaluate(pos, side))
        .clamp(MIN_STATIC, MAX_STATIC);
    Node::new(*pos, side, NodeState::Defined, weight)
}

/// ノードを取得し、なければ作って保存する
pub fn get_node<S: NodeStore, R: Rules>(ctx: &LinkContext<'_, S, R>, pos: &Position, side: Color) -> Node {
    let key = pos.fingerprint(side);
    ctx.store.load(
        key,
        |node| node.clone(),
        |key| {
            let node = create_node(ctx.rules, ctx.params.eval_center, pos, side);
            ctx.store.store(key, node.clone());
            node
        },
    )
}
