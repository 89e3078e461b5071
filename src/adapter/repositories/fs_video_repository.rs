//! File System Video Repository
//!
//! VideoRepositoryのファイルシステム実装
//!
//! メディアディレクトリを走査し、サブディレクトリ名をカテゴリとして
//! ギャラリーの動画エントリを組み立てる。

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::domain::entities::video_item::{VideoItem, UNCATEGORIZED};
use crate::domain::repositories::video_repository::VideoRepository;

/// 動画として扱う拡張子
const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mov", "avi", "webm", "mkv"];

/// ファイルシステムベースの動画リポジトリ
pub struct FsVideoRepository;

impl FsVideoRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// メディアディレクトリを走査する（内部実装）
    fn scan_internal(media_dir: &str) -> Result<Vec<VideoItem>> {
        let expanded = shellexpand::tilde(media_dir);
        let root = PathBuf::from(expanded.as_ref());

        if !root.exists() {
            warn!("Media directory does not exist: {}", root.display());
            return Ok(Vec::new());
        }

        let mut videos = Vec::new();

        for entry in WalkDir::new(&root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(extension) = path.extension().and_then(|s| s.to_str()) else {
                continue;
            };
            if !VIDEO_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str()) {
                continue;
            }

            let relative = path.strip_prefix(&root).unwrap_or(path);

            // カテゴリはメディアルート直下のディレクトリ名。
            // ルート直置きのファイルは未分類扱い。
            let category = match relative.parent().filter(|p| !p.as_os_str().is_empty()) {
                Some(_) => relative
                    .components()
                    .next()
                    .and_then(|c| c.as_os_str().to_str())
                    .unwrap_or(UNCATEGORIZED)
                    .to_string(),
                None => UNCATEGORIZED.to_string(),
            };

            let title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("untitled")
                .to_string();

            let id = relative.to_string_lossy().replace('\\', "/");

            videos.push(VideoItem::new(id, title, category, path.to_path_buf())?);
        }

        info!("Found {} videos in {}", videos.len(), root.display());

        Ok(videos)
    }
}

impl Default for FsVideoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoRepository for FsVideoRepository {
    async fn scan(&self, media_dir: &str) -> Result<Vec<VideoItem>> {
        Self::scan_internal(media_dir)
    }
}
