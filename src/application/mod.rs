//! # Application Layer
//!
//! アプリケーション固有のビジネスフロー（ユースケース）
//!
//! Domain層のtraitにのみ依存し、具体的なHTTP実装やファイルシステムは
//! Adapter層から注入される。

pub mod dto;
pub mod use_cases;
