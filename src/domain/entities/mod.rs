//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **Job**: サーバー側の動画処理ジョブ
//! - **VideoItem**: ローカルギャラリーの動画エントリ
//! - **DownloadSet**: 成果物ダウンロードURLのバリューオブジェクト

pub mod download_set;
pub mod job;
pub mod video_item;
