//! # VideoItem Entity
//!
//! ローカルギャラリーの動画エントリ

use serde::Serialize;
use std::path::PathBuf;

/// 未分類動画のカテゴリ名
pub const UNCATEGORIZED: &str = "uncategorized";

/// ギャラリー動画のドメインエンティティ
///
/// メディアディレクトリ配下の動画1本を表す。
/// カテゴリはメディアルート直下のサブディレクトリ名から導出される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoItem {
    /// メディアルートからの相対パス（一意識別子）
    pub id: String,
    /// 表示タイトル（ファイル名から拡張子を除いたもの）
    pub title: String,
    /// カテゴリ名
    pub category: String,
    /// 動画ファイルの絶対パス
    pub source: PathBuf,
}

impl VideoItem {
    /// 新しい動画エントリを作成
    ///
    /// # Errors
    ///
    /// `id` が空の場合にエラーを返す
    pub fn new(
        id: String,
        title: String,
        category: String,
        source: PathBuf,
    ) -> anyhow::Result<Self> {
        if id.is_empty() {
            anyhow::bail!("video id cannot be empty");
        }

        Ok(Self {
            id,
            title,
            category,
            source,
        })
    }
}
