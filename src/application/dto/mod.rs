//! # Application DTOs
//!
//! ユースケースへ渡す設定オブジェクト

pub mod upload_options;
