//! # Submit Upload Use Case
//!
//! 動画送信ユースケース
//!
//! アップロード前の助言的チェックを行い、処理APIへファイルを送信して
//! サーバー発行のジョブIDを受け取る。

use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::sync::Arc;

use crate::application::dto::upload_options::UploadOptions;
use crate::domain::entities::job::Job;
use crate::domain::repositories::processing_api::ProcessingApi;
use crate::domain::services::upload_check::UploadCheckService;

/// 動画送信ユースケース
///
/// 1ジョブにつき1回だけ呼ばれる
pub struct SubmitUploadUseCase<A: ProcessingApi> {
    api: Arc<A>,
}

impl<A: ProcessingApi> SubmitUploadUseCase<A> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `api` - 処理APIリポジトリ
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// 動画を送信してジョブを作成する
    ///
    /// # Arguments
    ///
    /// * `file` - アップロードする動画ファイルのパス
    /// * `options` - チェック設定
    ///
    /// # Returns
    ///
    /// サーバー発行のジョブIDを持つ `Job`
    ///
    /// # Errors
    ///
    /// ファイルが存在しない場合、事前チェックに失敗した場合、
    /// またはサーバーがアップロードを拒否した場合にエラーを返す
    pub async fn execute(&self, file: &Path, options: &UploadOptions) -> Result<Job> {
        let metadata = tokio::fs::metadata(file)
            .await
            .with_context(|| format!("Failed to read file metadata: {}", file.display()))?;

        anyhow::ensure!(metadata.is_file(), "Not a file: {}", file.display());

        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        UploadCheckService::check(
            file_name,
            metadata.len(),
            &options.allowed_extensions,
            options.max_upload_bytes,
        )?;

        info!(
            "Submitting {} ({} bytes) for processing",
            file.display(),
            metadata.len()
        );

        let job_id = self.api.submit(file).await?;

        Job::new(job_id, file.display().to_string())
    }
}
