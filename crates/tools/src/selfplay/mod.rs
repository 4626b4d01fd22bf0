pub mod game;
pub mod position;
pub mod types;

pub use game::{GameConfig, GameResult, MoveRecord, run_game};
pub use position::{START_ROWS, load_board, parse_board_text, start_position};
pub use types::{GameOutcome, parse_side, side_label};
