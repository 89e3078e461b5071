//! # Fetch Results Use Case
//!
//! 成果物ダウンロードユースケース
//!
//! 完了したジョブの3つの成果物（video / csv / json）を
//! ローカルディレクトリへ保存する。

use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::download_set::Artifact;
use crate::domain::repositories::processing_api::ProcessingApi;

/// 保存された成果物
#[derive(Debug, Clone)]
pub struct FetchedArtifact {
    pub artifact: Artifact,
    pub path: PathBuf,
    pub bytes: u64,
}

/// 成果物ダウンロードユースケース
pub struct FetchResultsUseCase<A: ProcessingApi> {
    api: Arc<A>,
}

impl<A: ProcessingApi> FetchResultsUseCase<A> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `api` - 処理APIリポジトリ
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// 3つの成果物を全てダウンロードする
    ///
    /// # Arguments
    ///
    /// * `job_id` - 完了したジョブのID
    /// * `output_dir` - 保存先ディレクトリ（なければ作成）
    ///
    /// # Returns
    ///
    /// 保存された成果物のリスト（video, csv, json の順）
    ///
    /// # Errors
    ///
    /// ディレクトリ作成またはいずれかのダウンロードに失敗した場合にエラーを返す
    pub async fn execute(&self, job_id: &str, output_dir: &Path) -> Result<Vec<FetchedArtifact>> {
        tokio::fs::create_dir_all(output_dir)
            .await
            .with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;

        let mut saved = Vec::with_capacity(Artifact::ALL.len());

        for artifact in Artifact::ALL {
            let dest = output_dir.join(artifact.file_name(job_id));
            let bytes = self.api.download(job_id, artifact, &dest).await?;

            info!(
                "Saved {} artifact for job {} to {} ({} bytes)",
                artifact.as_str(),
                job_id,
                dest.display(),
                bytes
            );

            saved.push(FetchedArtifact {
                artifact,
                path: dest,
                bytes,
            });
        }

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::processing_api::MockProcessingApi;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_fetch_downloads_all_three_artifacts() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut mock = MockProcessingApi::new();

        mock.expect_download()
            .times(3)
            .returning(|_, _, _| Ok(42));

        let use_case = FetchResultsUseCase::new(Arc::new(mock));

        let saved = use_case
            .execute("abc123", temp_dir.path())
            .await
            .unwrap();

        assert_eq!(saved.len(), 3);
        assert_eq!(saved[0].artifact, Artifact::Video);
        assert_eq!(saved[1].artifact, Artifact::Csv);
        assert_eq!(saved[2].artifact, Artifact::Json);
        assert!(saved.iter().all(|f| f.bytes == 42));
        assert!(saved[0].path.ends_with("abc123.mp4"));
        assert!(saved[1].path.ends_with("abc123.csv"));
        assert!(saved[2].path.ends_with("abc123.json"));
    }

    #[tokio::test]
    async fn test_fetch_stops_on_first_failure() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut mock = MockProcessingApi::new();

        mock.expect_download()
            .with(eq("abc123"), eq(Artifact::Video), mockall::predicate::always())
            .times(1)
            .returning(|_, _, _| {
                Err(crate::domain::repositories::processing_api::ApiError::Transport(
                    "connection reset".to_string(),
                ))
            });

        let use_case = FetchResultsUseCase::new(Arc::new(mock));

        let result = use_case.execute("abc123", temp_dir.path()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_creates_output_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let nested = temp_dir.path().join("results/run-1");
        let mut mock = MockProcessingApi::new();

        mock.expect_download().times(3).returning(|_, _, _| Ok(1));

        let use_case = FetchResultsUseCase::new(Arc::new(mock));

        use_case.execute("abc123", &nested).await.unwrap();

        assert!(nested.is_dir());
    }
}
