//! HTTP Adapter
//!
//! 処理APIとのHTTP通信

pub mod api_client;
pub mod endpoints;
