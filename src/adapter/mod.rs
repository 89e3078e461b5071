//! Adapter Layer
//!
//! 外部システム（処理API, ファイルシステム）との統合

pub mod config;
pub mod http;
pub mod repositories;
