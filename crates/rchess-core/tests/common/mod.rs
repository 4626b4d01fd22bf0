#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use rchess_core::linker::{NodeState, NodeStore};
use rchess_core::movegen::Rules;
use rchess_core::position::Position;
use rchess_core::types::{Color, Move, Piece, PieceKind, Square};

pub fn board(rows: &[&str]) -> Position {
    Position::from_rows(rows).unwrap()
}

pub fn load_board(name: &str) -> Position {
    let path = format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}

/// 局面を番号で表すだけのグラフ規則
///
/// 番号 `i` の局面は升 `i` に白キングが1枚だけある盤面。
pub struct GraphRules {
    edges: HashMap<usize, Vec<usize>>,
    lost: HashSet<(usize, Color)>,
}

impl GraphRules {
    pub fn new(edges: &[(usize, &[usize])]) -> Self {
        Self {
            edges: edges.iter().map(|&(from, to)| (from, to.to_vec())).collect(),
            lost: HashSet::new(),
        }
    }

    pub fn with_lost(mut self, id: usize, side: Color) -> Self {
        self.lost.insert((id, side));
        self
    }

    pub fn position(id: usize) -> Position {
        let mut pos = Position::empty();
        pos.put_piece(Square::from_index(id), Piece::new(PieceKind::King, Color::White));
        pos
    }

    fn id_of(pos: &Position) -> usize {
        Square::all()
            .find(|&sq| !pos.piece_on(sq).is_none())
            .map_or(0, |sq| sq.index())
    }
}

impl Rules for GraphRules {
    fn expand<'a>(
        &'a self,
        pos: &'a Position,
        _side: Color,
    ) -> Box<dyn Iterator<Item = (Move, Position)> + 'a> {
        let from = Self::id_of(pos);
        let targets = self.edges.get(&from).map(Vec::as_slice).unwrap_or(&[]);
        Box::new(targets.iter().map(move |&to| {
            let mv = Move::new(Square::from_index(from), Square::from_index(to), false);
            (mv, Self::position(to))
        }))
    }

    fn has_lost(&self, pos: &Position, side: Color) -> bool {
        self.lost.contains(&(Self::id_of(pos), side))
    }

    fn evaluate(&self, pos: &Position, _side: Color) -> i32 {
        // 番号ごとに少しずつ違う重みにする
        Self::id_of(pos) as i32 * 100 - 300
    }
}

/// ストア全体のティック収支: 注入量 = 未消化の総和 + 展開コストの総和
pub fn assert_ticks_conserved<S: NodeStore>(store: &S, injected: u64, link_cost: u64) {
    let mut accumulated = 0;
    let mut expansions = 0;
    store.each(|_, node| {
        accumulated += node.tick_accumulated;
        let expanded = node.state == NodeState::Linked
            || node.exhausted
            || (node.state == NodeState::Won && node.winning_turn.is_some());
        if expanded {
            expansions += 1;
        }
    });
    assert_eq!(accumulated + expansions * link_cost, injected);
}
