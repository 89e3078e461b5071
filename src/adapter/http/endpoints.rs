//! API Endpoints
//!
//! エンドポイントURLの組み立て

use crate::domain::entities::download_set::DownloadSet;

/// APIエンドポイントビルダー
///
/// ベースURLを正規化し、HTTP契約の各パスを組み立てる
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// 新しいビルダーを作成
    ///
    /// # Arguments
    ///
    /// * `base_url` - APIベースURL（末尾スラッシュは除去される）
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn upload(&self) -> String {
        format!("{}/api/upload", self.base)
    }

    pub fn status(&self, job_id: &str) -> String {
        format!("{}/api/status/{}", self.base, job_id)
    }

    pub fn cancel(&self, job_id: &str) -> String {
        format!("{}/api/cancel/{}", self.base, job_id)
    }

    pub fn health(&self) -> String {
        format!("{}/health", self.base)
    }

    /// 成果物ダウンロードURLのセットを導出
    pub fn downloads(&self, job_id: &str) -> DownloadSet {
        DownloadSet::new(&self.base, job_id)
    }
}
