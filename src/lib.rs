//! # Clipsync
//!
//! 動画をリモートのポーズ処理APIへアップロードし、結果を同期するクライアント
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: ビジネスの核心的なルールとエンティティ（外部依存なし）
//! - **Application層**: アプリケーション固有のビジネスフロー（ユースケース）
//! - **Adapter層**: 外部システムとの統合（処理API, ファイルシステム等）
//! - **Driver層**: CLI、依存性注入
//!
//! 処理そのもの（ポーズ検出、動画変換）はリモートサービスに委譲され、
//! このクレートはそのHTTP契約（アップロード、ポーリング、取消、
//! ダウンロード）だけを実装する。

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
