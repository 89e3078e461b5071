//! # Video Repository Trait
//!
//! ローカル動画ライブラリの走査を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::video_item::VideoItem;

/// 動画リポジトリ
///
/// ギャラリーに表示する動画の発見を担当するリポジトリ
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// メディアディレクトリを走査して動画エントリを返す
    ///
    /// # Arguments
    ///
    /// * `media_dir` - メディアディレクトリのパス
    ///
    /// # Returns
    ///
    /// 発見された動画エントリのリスト（ディレクトリが無い場合は空）
    async fn scan(&self, media_dir: &str) -> Result<Vec<VideoItem>>;
}
