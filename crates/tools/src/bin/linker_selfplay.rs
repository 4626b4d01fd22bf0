use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use log::info;
use rchess_core::linker::{Linker, LinkerParams};
use rchess_core::types::Color;
use tools::common::io::open_writer;
use tools::selfplay::{GameConfig, load_board, parse_side, run_game, side_label, start_position};

/// リンカー同士の自己対局ハーネス。
///
/// # よく使うコマンド例
///
/// - 初期配置から 20 手、デフォルト出力先:
///   `cargo run -p tools --release --bin linker_selfplay -- --max-plies 20`
///
/// - 盤面ファイルから黒番で、毎手ストアを空にして gzip 出力:
///   `cargo run -p tools --release --bin linker_selfplay -- --board board.json --side black --fresh-store --out runs/linker/midgame.jsonl.gz`
///
/// - パラメータを TOML で与えて一部だけ上書き:
///   `cargo run -p tools --release --bin linker_selfplay -- --params linker.toml --tick-threshold 20000`
///
/// `--out` 未指定時は `runs/linker/<timestamp>-selfplay.jsonl` に書き出す。
#[derive(Parser, Debug)]
#[command(author, version, about = "rchess linker selfplay harness")]
struct Cli {
    /// Board file (JSON array of 8 rows, or 8 text lines with '.' for empty squares)
    #[arg(long)]
    board: Option<PathBuf>,

    /// Side to move first
    #[arg(long, default_value = "white", value_parser = parse_side)]
    side: Color,

    /// Maximum plies before declaring a draw
    #[arg(long, default_value_t = 40)]
    max_plies: u32,

    /// Ticks injected per sink
    #[arg(long, default_value_t = 5000)]
    ticks: u64,

    /// Sinks per move
    #[arg(long, default_value_t = 100)]
    sinks: u32,

    /// Reevaluate every N sinks (0 = only before selecting)
    #[arg(long, default_value_t = 0)]
    reevaluate_every: u32,

    /// Clear the node store before each move
    #[arg(long, default_value_t = false)]
    fresh_store: bool,

    /// Linker parameters (TOML)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Override link_cost
    #[arg(long)]
    link_cost: Option<u64>,

    /// Override tick_threshold
    #[arg(long)]
    tick_threshold: Option<u64>,

    /// Output JSONL path ("-" for stdout, ".gz" for gzip)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.sinks == 0 || cli.ticks == 0 {
        bail!("--sinks and --ticks must be positive");
    }

    let params = load_params(&cli)?;
    let linker = Linker::new(params).context("invalid linker parameters")?;

    let start = match cli.board.as_deref() {
        Some(path) => load_board(path)?,
        None => start_position(),
    };
    info!("start position ({} to move):\n{start}", cli.side);

    let timestamp = Local::now();
    let output_path = resolve_output_path(cli.out.as_deref(), &timestamp);
    let mut writer = open_writer(&output_path)
        .with_context(|| format!("failed to open {}", output_path.display()))?;

    let config = GameConfig {
        max_plies: cli.max_plies,
        ticks: cli.ticks,
        sinks: cli.sinks,
        reevaluate_every: cli.reevaluate_every,
        fresh_store: cli.fresh_store,
    };
    let result = run_game(&linker, start, cli.side, &config, &mut |record| {
        writer.write_json_line(record).context("failed to write move record")
    })?;
    writer
        .close()
        .with_context(|| format!("failed to close {}", output_path.display()))?;

    info!(
        "result: {} ({}) after {} plies, {} to move",
        result.outcome.label(),
        result.reason,
        result.plies,
        side_label(result.side)
    );
    info!("final position:\n{}", result.position);
    info!("store: {}", linker.stats());
    info!("moves written to {}", output_path.display());
    Ok(())
}

fn load_params(cli: &Cli) -> Result<LinkerParams> {
    let mut params = match cli.params.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<LinkerParams>(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => LinkerParams::default(),
    };
    if let Some(v) = cli.link_cost {
        params.link_cost = v;
    }
    if let Some(v) = cli.tick_threshold {
        params.tick_threshold = v;
    }
    params.validate()?;
    Ok(params)
}

fn resolve_output_path(out: Option<&Path>, timestamp: &chrono::DateTime<Local>) -> PathBuf {
    if let Some(path) = out {
        return path.to_path_buf();
    }
    let name = format!("{}-selfplay.jsonl", timestamp.format("%Y%m%d-%H%M%S"));
    PathBuf::from("runs/linker").join(name)
}
