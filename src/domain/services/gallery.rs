//! # Gallery Store
//!
//! 動画リストとカテゴリフィルタを所有するストア
//!
//! 共有可変のグローバル配列ではなく、明示的に所有されたストアとして
//! 表示側の関数へ渡される。

use crate::domain::entities::video_item::VideoItem;

/// 全カテゴリを表す疑似カテゴリ名
pub const ALL_CATEGORIES: &str = "all";

/// ギャラリーストア
///
/// 動画リストと現在のカテゴリフィルタを保持する。
/// 表示順はカテゴリ、タイトルの順で決定的。
#[derive(Debug, Clone)]
pub struct GalleryStore {
    videos: Vec<VideoItem>,
    active_category: String,
}

impl GalleryStore {
    /// 新しいストアを作成
    ///
    /// # Arguments
    ///
    /// * `videos` - ギャラリーに表示する動画のリスト
    pub fn new(mut videos: Vec<VideoItem>) -> Self {
        videos.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.title.cmp(&b.title))
        });

        Self {
            videos,
            active_category: ALL_CATEGORIES.to_string(),
        }
    }

    /// カテゴリフィルタを設定
    ///
    /// `"all"` を指定すると全動画が表示対象になる
    pub fn set_filter(&mut self, category: &str) {
        self.active_category = category.to_string();
    }

    /// 現在のカテゴリフィルタを返す
    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    /// フィルタ適用後の表示対象動画を返す
    pub fn visible(&self) -> Vec<&VideoItem> {
        self.videos
            .iter()
            .filter(|v| {
                self.active_category == ALL_CATEGORIES || v.category == self.active_category
            })
            .collect()
    }

    /// 存在するカテゴリの一覧を返す（重複なし、ソート済み）
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.videos.iter().map(|v| v.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// ストア内の動画総数を返す
    #[inline]
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    /// ストアが空かどうかを返す
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}
