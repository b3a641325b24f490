//! ツールスタック推薦CLI
//!
//! 入力ファイルの読み込み・設定・レポート出力。推薦ロジックは `toolstack_common` にある。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
