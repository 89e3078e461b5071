//! Client Configuration
//!
//! クライアント設定（JSONファイル、なければデフォルト値）

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// デフォルトのAPIベースURL
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// クライアント設定
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// APIベースURL
    pub base_url: String,
    /// ギャラリーのメディアディレクトリ
    pub media_dir: String,
    /// 成果物の保存先ディレクトリ
    pub output_dir: String,
    /// ポーリング間隔（ミリ秒）
    pub poll_interval_ms: u64,
    /// HTTPリクエストタイムアウト（秒）
    pub request_timeout_secs: u64,
    /// 最大アップロードサイズ（バイト、0で無制限）
    pub max_upload_bytes: u64,
    /// アップロードを許可する拡張子（小文字）
    pub allowed_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            media_dir: "./media".to_string(),
            output_dir: "./results".to_string(),
            poll_interval_ms: 1000,
            request_timeout_secs: 30,
            max_upload_bytes: 500 * 1024 * 1024,
            allowed_extensions: vec![
                "mp4".to_string(),
                "mov".to_string(),
                "avi".to_string(),
                "webm".to_string(),
                "mkv".to_string(),
            ],
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む
    ///
    /// ファイルが存在しない場合はデフォルト設定を返す。
    /// 設定ファイルなしでも動作するのが既定の体験であるため。
    ///
    /// # Errors
    ///
    /// ファイルの読み込みまたはJSONのパースに失敗した場合にエラーを返す
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if !path.exists() {
            info!(
                "No config file at {}, using defaults ({})",
                path.display(),
                DEFAULT_BASE_URL
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON: {}", path.display()))?;

        Ok(config)
    }
}
