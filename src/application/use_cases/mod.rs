//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **SubmitUploadUseCase**: 事前チェックと動画の送信
//! - **TrackJobUseCase**: 終端状態までのポーリングと取消
//! - **FetchResultsUseCase**: 成果物のダウンロード

pub mod fetch_results;
pub mod submit_upload;
pub mod track_job;
