//! 重みの再評価
//!
//! 根から木を辿り、子の重みから各ノードの重みを計算し直す。
//!
//! - `tick_processed` が `tick_threshold` を超えた Linked ノードだけ子へ降りる
//! - それ以外は再帰しない見積もり（静的重み、勝敗確定なら番兵値）
//! - 現在の経路上の局面は降りずに、そのパスで入ったときに置いた暫定値を使う
//! - 評価パスごとに番号（epoch）を振り、同じパスで評価済みのノードは再計算しない
//!
//! 前のパスで書いた値は読まないので、ストアが変わらなければ何度呼んでも同じ結果になる。

use std::collections::HashSet;

use log::debug;

use super::factory;
use super::node::{Node, NodeState};
use super::store::NodeStore;
use super::{LOST_WEIGHT, LinkContext, WEIGHT_EPSILON, WIN_WEIGHT, mirror};
use crate::movegen::Rules;
use crate::position::Position;
use crate::types::Color;

/// 子を評価中のノード
struct Frame {
    key: u64,
    node: Node,
    /// 評価済みの子の値（`node.turns` の先頭から）
    values: Vec<f64>,
}

impl Frame {
    /// 次に評価する子の指紋と、その枝の現在の重み
    fn pending(&self) -> Option<(u64, f64)> {
        self.node
            .turns
            .get(self.values.len())
            .map(|turn| (turn.target, turn.weight))
    }
}

enum Step {
    Value(f64),
    Descend(Frame),
}

/// `pos`（手番 `side`）を根に重みを再評価し、根の重みを返す
pub fn reevaluate<S: NodeStore, R: Rules>(
    ctx: &LinkContext<'_, S, R>,
    pos: &Position,
    side: Color,
) -> f64 {
    factory::get_node(ctx, pos, side);
    let epoch = ctx.next_epoch();
    let root_key = pos.fingerprint(side);

    let mut path = HashSet::new();
    let mut visited = 0usize;
    let mut frames = Vec::new();

    let mut root_weight = match enter(ctx, root_key, 0.0, epoch, &path, &mut visited) {
        Step::Value(weight) => weight,
        Step::Descend(frame) => {
            path.insert(root_key);
            frames.push(frame);
            0.0
        }
    };

    while let Some(top) = frames.last() {
        if let Some((target, fallback)) = top.pending() {
            match enter(ctx, target, fallback, epoch, &path, &mut visited) {
                Step::Value(value) => {
                    if let Some(top) = frames.last_mut() {
                        top.values.push(value);
                    }
                }
                Step::Descend(child) => {
                    path.insert(target);
                    frames.push(child);
                }
            }
            continue;
        }

        let Some(done) = frames.pop() else {
            break;
        };
        path.remove(&done.key);
        let value = finish(ctx, done, epoch);
        match frames.last_mut() {
            Some(parent) => parent.values.push(value),
            None => root_weight = value,
        }
    }

    debug!("reevaluate: epoch={epoch} visited={visited} weight={root_weight:.3}");
    root_weight
}

/// ノードに入る。降りる必要がなければその値を返す
fn enter<S: NodeStore, R: Rules>(
    ctx: &LinkContext<'_, S, R>,
    key: u64,
    fallback: f64,
    epoch: u64,
    path: &HashSet<u64>,
    visited: &mut usize,
) -> Step {
    let Some(mut node) = ctx.store.get(key) else {
        return Step::Value(fallback);
    };
    if path.contains(&key) || node.weight_epoch == epoch {
        return Step::Value(node.weight);
    }
    *visited += 1;

    // 入った時点で暫定値を置く（循環で戻ってきたときはこれを読む）
    let flat = node.flat_weight();
    node.weight = flat;
    node.weight_epoch = epoch;

    if node.state == NodeState::Linked && node.tick_processed > ctx.params.tick_threshold {
        ctx.store.store(key, node.clone());
        let values = Vec::with_capacity(node.turns.len());
        return Step::Descend(Frame { key, node, values });
    }

    if node.state == NodeState::Linked {
        for turn in node.turns.iter_mut() {
            if let Some(weight) = ctx.store.load(turn.target, |t| Some(t.flat_weight()), |_| None) {
                turn.weight = weight;
            }
            turn.refreshed = epoch;
        }
    }
    ctx.store.store(key, node);
    Step::Value(flat)
}

/// 子の値から枝の重みとノードの重みを決める
fn finish<S: NodeStore, R: Rules>(ctx: &LinkContext<'_, S, R>, frame: Frame, epoch: u64) -> f64 {
    let Frame {
        key,
        mut node,
        values,
    } = frame;
    assert!(
        values.iter().all(|c| !c.is_nan()),
        "NaN child weight below node {key:#018x}"
    );

    let weight = if values.contains(&LOST_WEIGHT) {
        for (turn, &c) in node.turns.iter_mut().zip(&values) {
            turn.weight = c;
            turn.refreshed = epoch;
        }
        WIN_WEIGHT
    } else {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let spread = (mean - min).max(WEIGHT_EPSILON);
        for (turn, &c) in node.turns.iter_mut().zip(&values) {
            turn.weight = if c >= WIN_WEIGHT {
                c
            } else {
                let d = c - min;
                (min + d * (1.0 + d / spread)).min(WIN_WEIGHT - 1.0).max(min)
            };
            turn.refreshed = epoch;
        }
        let share = ctx.params.static_share;
        (1.0 - share) * mirror(min) + share * f64::from(node.static_weight)
    };
    assert!(!weight.is_nan(), "NaN weight at node {key:#018x}");

    node.weight = weight;
    node.weight_epoch = epoch;
    ctx.store.store(key, node);
    weight
}
