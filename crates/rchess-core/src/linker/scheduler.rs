//! ティック配分
//!
//! 注入されたティックを根から子へ配る。
//!
//! - Defined: 未消化ティックが `link_cost` に達したら展開する
//! - Linked: 未消化ティックが `枝数 × turns_mult` に達したら、勝敗未確定の枝へ重みの逆数に比例して配る
//! - Won/Lost: ティックを貯めるだけ
//!
//! 1回の訪問で処理するのは訪問時点の状態の分岐ひとつだけ。
//! 再帰ではなく明示的なスタックで辿り、現在の経路上にある局面へは配らない。

use std::collections::HashSet;

use log::{debug, trace, warn};

use super::factory;
use super::node::{Node, NodeState, Turn};
use super::store::NodeStore;
use super::{LOST_WEIGHT, LinkContext};
use crate::movegen::Rules;
use crate::position::Position;
use crate::types::Color;

enum Work {
    /// ノードへティックを渡す
    Visit { key: u64, ticks: u64 },
    /// 経路から外す
    Leave(u64),
}

/// `pos`（手番 `side`）へ `ticks` を注入する
///
/// ノードがなければ作る。配りきれなかった分は各ノードの `tick_accumulated` に残る。
pub fn propagate_ticks<S: NodeStore, R: Rules>(
    ctx: &LinkContext<'_, S, R>,
    ticks: u64,
    pos: &Position,
    side: Color,
) {
    factory::get_node(ctx, pos, side);

    let mut stack = vec![Work::Visit {
        key: pos.fingerprint(side),
        ticks,
    }];
    let mut path = HashSet::new();
    let mut visited = 0usize;
    let mut expanded = 0usize;

    while let Some(work) = stack.pop() {
        let (key, ticks) = match work {
            Work::Leave(key) => {
                path.remove(&key);
                continue;
            }
            Work::Visit { key, ticks } => (key, ticks),
        };
        let Some(mut node) = ctx.store.get(key) else {
            continue;
        };
        visited += 1;
        node.tick_accumulated += ticks;
        path.insert(key);
        stack.push(Work::Leave(key));

        match node.state {
            NodeState::Defined => {
                if link(ctx, key, &mut node) {
                    expanded += 1;
                }
            }
            NodeState::Linked => distribute(ctx, &mut node, &path, &mut stack),
            NodeState::Won | NodeState::Lost => {}
        }
        ctx.store.store(key, node);
    }

    debug!("propagate_ticks: ticks={ticks} visited={visited} expanded={expanded}");
}

/// 展開する。展開したら true
fn link<S: NodeStore, R: Rules>(ctx: &LinkContext<'_, S, R>, key: u64, node: &mut Node) -> bool {
    let cost = ctx.params.link_cost;
    if node.exhausted || node.tick_accumulated < cost {
        return false;
    }
    node.tick_accumulated -= cost;
    node.tick_processed += cost;

    let child_side = !node.side;
    let mut turns = Vec::new();
    for (mv, next) in ctx.rules.expand(&node.position, node.side) {
        let child = factory::get_node(ctx, &next, child_side);
        turns.push(Turn::new(mv, next.fingerprint(child_side), child.flat_weight()));
    }

    if turns.is_empty() {
        warn!("node {key:#018x} has no replies");
        node.exhausted = true;
        return true;
    }

    if let Some(winning) = turns.iter().find(|turn| turn.weight == LOST_WEIGHT) {
        debug!("node {key:#018x} won by {}", winning.mv);
        node.state = NodeState::Won;
        node.winning_turn = Some(*winning);
        node.weight = node.flat_weight();
        return true;
    }

    debug!("node {key:#018x} linked with {} turns", turns.len());
    node.state = NodeState::Linked;
    node.turns = turns;
    true
}

/// 勝敗未確定の枝へ `1/weight` に比例してティックを配る
fn distribute<S: NodeStore, R: Rules>(
    ctx: &LinkContext<'_, S, R>,
    node: &mut Node,
    path: &HashSet<u64>,
    stack: &mut Vec<Work>,
) {
    let needed = node.turns.len() as u64 * ctx.params.turns_mult;
    if node.tick_accumulated < needed {
        return;
    }

    let budget: f64 = node
        .turns
        .iter()
        .filter(|turn| turn.is_open())
        .map(|turn| turn.weight.recip())
        .sum();
    if budget <= 0.0 {
        return;
    }

    let share = node.tick_accumulated as f64 / budget;
    let mut remaining = node.tick_accumulated;
    let mut chunks = Vec::with_capacity(node.turns.len());
    for turn in node.turns.iter().filter(|turn| turn.is_open()) {
        if path.contains(&turn.target) {
            continue;
        }
        let chunk = ((share / turn.weight).floor() as u64).min(remaining);
        if chunk == 0 {
            continue;
        }
        trace!("  {} <- {chunk} ticks (weight {:.3})", turn.mv, turn.weight);
        remaining -= chunk;
        chunks.push(Work::Visit {
            key: turn.target,
            ticks: chunk,
        });
    }

    node.tick_processed += node.tick_accumulated - remaining;
    node.tick_accumulated = remaining;
    // 先頭の枝から処理する
    stack.extend(chunks.into_iter().rev());
}
