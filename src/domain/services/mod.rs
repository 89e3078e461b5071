//! # Domain Services
//!
//! ドメインサービス（ビジネスルール）
//!
//! ## サービス
//!
//! - **GalleryStore**: 動画リストとカテゴリフィルタを所有するストア
//! - **UploadCheckService**: アップロード前の助言的チェック

pub mod gallery;
pub mod upload_check;
