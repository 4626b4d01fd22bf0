use std::io::Write;

use rchess_core::linker::{Linker, LinkerParams, NodeStore};
use rchess_core::types::Color;
use tools::selfplay::{GameConfig, GameOutcome, MoveRecord, load_board, parse_board_text, run_game};

fn small_config() -> GameConfig {
    GameConfig {
        max_plies: 6,
        ticks: 2000,
        sinks: 5,
        reevaluate_every: 2,
        fresh_store: false,
    }
}

#[test]
fn capture_ends_the_game() {
    let linker = Linker::new(LinkerParams::default()).unwrap();
    let pos = parse_board_text("....k...\n........\n........\n........\n....R...\n........\n........\nK.......\n").unwrap();

    let mut records: Vec<MoveRecord> = Vec::new();
    let result = run_game(&linker, pos, Color::White, &small_config(), &mut |r| {
        records.push(r.clone());
        Ok(())
    })
    .unwrap();

    assert_eq!(result.outcome, GameOutcome::WhiteWin);
    assert_eq!(result.reason, "king_captured");
    assert_eq!(result.plies, 1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].mv, "(4,4)->(4,0)");
    assert_eq!(records[0].board[0], "    R   ");
}

#[test]
fn game_stops_at_max_plies_and_writes_json() {
    let linker = Linker::new(LinkerParams::default()).unwrap();
    let pos = parse_board_text("....k...\n........\n........\n........\n........\n........\n........\n....K...\n").unwrap();
    let config = GameConfig {
        max_plies: 3,
        fresh_store: true,
        ..small_config()
    };

    let mut lines = Vec::new();
    let result = run_game(&linker, pos, Color::White, &config, &mut |r| {
        lines.push(serde_json::to_string(r)?);
        Ok(())
    })
    .unwrap();

    assert_eq!(result.outcome, GameOutcome::Draw);
    assert_eq!(result.reason, "max_plies");
    assert_eq!(result.plies, 3);
    assert_eq!(result.side, Color::Black);
    assert_eq!(lines.len(), 3);

    let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(first["ply"], 1);
    assert_eq!(first["side"], "white");
    assert!(first["move"].as_str().unwrap().starts_with("(4,7)->"));
    assert_eq!(first["board"].as_array().unwrap().len(), 8);
}

#[test]
fn exhausted_side_has_no_turn() {
    let linker = Linker::new(LinkerParams::default()).unwrap();
    let pos = parse_board_text("KP......\nPP......\n........\n........\n........\n........\n........\n.......k\n").unwrap();
    let result = run_game(&linker, pos, Color::White, &small_config(), &mut |_| Ok(())).unwrap();
    assert_eq!(result.outcome, GameOutcome::Draw);
    assert_eq!(result.reason, "no_turn");
    assert_eq!(result.plies, 0);
}

#[test]
fn missing_king_is_reported_before_search() {
    let linker = Linker::new(LinkerParams::default()).unwrap();
    let pos = parse_board_text("........\n........\n........\n........\n........\n........\n........\n....K...\n").unwrap();
    let result = run_game(&linker, pos, Color::Black, &small_config(), &mut |_| Ok(())).unwrap();
    assert_eq!(result.outcome, GameOutcome::WhiteWin);
    assert_eq!(result.plies, 0);
    assert!(linker.store().is_empty());
}

#[test]
fn board_file_loading() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("board.json");
    std::fs::write(&json_path, include_str!("../../rchess-core/tests/data/midgame.json")).unwrap();
    let from_json = load_board(&json_path).unwrap();
    assert_eq!(from_json.piece_count(), 22);

    let text_path = dir.path().join("board.txt");
    let mut f = std::fs::File::create(&text_path).unwrap();
    for row in from_json.to_rows() {
        writeln!(f, "{}", row.replace(' ', ".")).unwrap();
    }
    drop(f);
    assert_eq!(load_board(&text_path).unwrap(), from_json);

    let missing = dir.path().join("nope.json");
    let err = load_board(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read"));
}
