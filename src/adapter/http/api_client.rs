//! HTTP Processing API Client
//!
//! ProcessingApiのreqwest実装
//!
//! ワイヤDTO（サーバーのJSON表現）とドメインエンティティを分離し、
//! ステータス文字列は厳格にパースする。

use async_trait::async_trait;
use log::info;
use reqwest::multipart;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::adapter::http::endpoints::Endpoints;
use crate::domain::entities::download_set::Artifact;
use crate::domain::entities::job::{JobStatus, StatusSnapshot};
use crate::domain::repositories::processing_api::{ApiError, HealthInfo, ProcessingApi};

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// アップロード応答のワイヤ表現
#[derive(Debug, Deserialize)]
struct UploadResponse {
    job_id: String,
}

/// ステータス応答のワイヤ表現
///
/// `status` は一旦文字列で受け取り、ドメインの `JobStatus` へ
/// 厳格に変換する。未知の値はプロトコル違反として報告する。
#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
    percent: Option<f64>,
    loaded: Option<u64>,
    total: Option<u64>,
    error: Option<String>,
}

impl StatusResponse {
    fn into_snapshot(self) -> Result<StatusSnapshot, ApiError> {
        let status =
            JobStatus::parse(&self.status).ok_or_else(|| ApiError::Protocol(self.status.clone()))?;

        Ok(StatusSnapshot {
            status,
            percent: self.percent,
            loaded: self.loaded,
            total: self.total,
            error: self.error,
        })
    }
}

/// HTTPベースの処理APIクライアント
pub struct HttpProcessingApi {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpProcessingApi {
    /// 新しいクライアントを作成
    ///
    /// # Arguments
    ///
    /// * `base_url` - APIベースURL
    /// * `timeout` - リクエストごとのタイムアウト
    ///
    /// # Errors
    ///
    /// HTTPクライアントの構築に失敗した場合にエラーを返す
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            endpoints: Endpoints::new(base_url),
        })
    }
}

#[async_trait]
impl ProcessingApi for HttpProcessingApi {
    async fn submit(&self, file: &Path) -> Result<String, ApiError> {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();

        let bytes = tokio::fs::read(file).await.map_err(|e| {
            ApiError::Transport(format!("failed to read {}: {}", file.display(), e))
        })?;

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoints.upload())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upload {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(format!("invalid upload response: {}", e)))?;

        info!("Server accepted upload as job {}", parsed.job_id);

        Ok(parsed.job_id)
    }

    async fn status(&self, job_id: &str) -> Result<StatusSnapshot, ApiError> {
        let response = self
            .client
            .get(self.endpoints.status(job_id))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Transport(format!(
                "status endpoint returned HTTP {}: {}",
                status, body
            )));
        }

        let parsed: StatusResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(format!("invalid status response: {}", e)))?;

        parsed.into_snapshot()
    }

    async fn cancel(&self, job_id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoints.cancel(job_id))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Transport(format!(
                "cancel endpoint returned HTTP {}",
                status
            )));
        }

        Ok(())
    }

    async fn download(
        &self,
        job_id: &str,
        artifact: Artifact,
        dest: &Path,
    ) -> Result<u64, ApiError> {
        let urls = self.endpoints.downloads(job_id);

        let response = self.client.get(urls.url(artifact)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Transport(format!(
                "download of {} for job {} returned HTTP {}",
                artifact.as_str(),
                job_id,
                status
            )));
        }

        let bytes = response.bytes().await?;

        tokio::fs::write(dest, &bytes).await.map_err(|e| {
            ApiError::Transport(format!("failed to write {}: {}", dest.display(), e))
        })?;

        Ok(bytes.len() as u64)
    }

    async fn health(&self) -> Result<HealthInfo, ApiError> {
        let response = self.client.get(self.endpoints.health()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Transport(format!(
                "health endpoint returned HTTP {}",
                status
            )));
        }

        let info: HealthInfo = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(format!("invalid health response: {}", e)))?;

        Ok(info)
    }
}
