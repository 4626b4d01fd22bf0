//! rchess リンカーの対局ドライバと補助ツール

pub mod common;
pub mod selfplay;
