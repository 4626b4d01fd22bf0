use anyhow::Result;
use log::{debug, info};
use rchess_core::linker::{Linker, NodeState, NodeStore};
use rchess_core::movegen::Rules;
use rchess_core::position::{Position, ROWS};
use rchess_core::types::Color;
use serde::Serialize;

use super::types::GameOutcome;

/// 対局設定
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub max_plies: u32,
    /// 1回の注入量
    pub ticks: u64,
    /// 1手あたりの注入回数
    pub sinks: u32,
    /// 何回注入するごとに再評価するか（0 なら選択直前の1回だけ）
    pub reevaluate_every: u32,
    /// 毎手ストアを空にする
    pub fresh_store: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_plies: 40,
            ticks: 5000,
            sinks: 100,
            reevaluate_every: 0,
            fresh_store: false,
        }
    }
}

/// 1手ごとの記録（JSONL 1行）
#[derive(Debug, Clone, Serialize)]
pub struct MoveRecord {
    pub ply: u32,
    pub side: Color,
    #[serde(rename = "move")]
    pub mv: String,
    /// 選んだ枝の重み
    pub weight: f64,
    /// 指す前の局面の重み
    pub root_weight: f64,
    pub nodes: usize,
    pub ticks_processed: u64,
    /// 指した後の盤面
    pub board: [String; ROWS],
}

/// 対局結果
#[derive(Debug, Clone)]
pub struct GameResult {
    pub outcome: GameOutcome,
    pub reason: String,
    pub plies: u32,
    pub position: Position,
    pub side: Color,
}

/// `start`（手番 `side`）から1局を進める
///
/// 各手で `sinks` 回ティックを注入し、再評価してから最小重みの手を指す。
/// 王が取られた、勝敗確定、指す手がない、`max_plies` のいずれかで終わる。
pub fn run_game<S: NodeStore, R: Rules>(
    linker: &Linker<S, R>,
    start: Position,
    side: Color,
    config: &GameConfig,
    on_move: &mut dyn FnMut(&MoveRecord) -> Result<()>,
) -> Result<GameResult> {
    let mut pos = start;
    let mut side = side;
    let mut plies = 0u32;

    let finish = |outcome, reason: &str, plies, pos, side| GameResult {
        outcome,
        reason: reason.to_string(),
        plies,
        position: pos,
        side,
    };

    while plies < config.max_plies {
        if let Some(winner) = king_capture_winner(linker.rules(), &pos) {
            return Ok(finish(GameOutcome::win_for(winner), "king_captured", plies, pos, side));
        }
        if config.fresh_store {
            linker.clear();
        }

        for sink in 1..=config.sinks {
            linker.propagate_ticks(config.ticks, &pos, side);
            if config.reevaluate_every > 0 && sink % config.reevaluate_every == 0 {
                linker.reevaluate(&pos, side);
            }
        }
        let root_weight = linker.reevaluate(&pos, side);
        let stats = linker.stats();
        debug!("ply {} {side}: {stats}", plies + 1);

        let Some(selection) = linker.select_turn(&pos, side) else {
            return Ok(finish(GameOutcome::Draw, "no_turn", plies, pos, side));
        };
        plies += 1;

        let record = MoveRecord {
            ply: plies,
            side,
            mv: selection.mv.to_string(),
            weight: selection.weight,
            root_weight,
            nodes: stats.total,
            ticks_processed: stats.ticks_processed,
            board: selection.position.to_rows(),
        };
        info!("{:>3} {side:<5} {} weight={:.3}", plies, record.mv, record.weight);
        on_move(&record)?;

        pos = selection.position;
        side = selection.side;

        match linker.get_node(&pos, side).state {
            NodeState::Won => {
                return Ok(finish(GameOutcome::win_for(side), "forced_capture", plies, pos, side));
            }
            NodeState::Lost => {
                return Ok(finish(GameOutcome::win_for(!side), "king_captured", plies, pos, side));
            }
            NodeState::Defined | NodeState::Linked => {}
        }
    }

    Ok(finish(GameOutcome::Draw, "max_plies", plies, pos, side))
}

/// 王のない側がいればその相手を返す
fn king_capture_winner<R: Rules>(rules: &R, pos: &Position) -> Option<Color> {
    [Color::White, Color::Black]
        .into_iter()
        .find(|&c| rules.has_lost(pos, c))
        .map(|loser| !loser)
}
