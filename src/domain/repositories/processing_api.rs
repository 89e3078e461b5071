//! # Processing API Trait
//!
//! リモート動画処理APIとのやり取りを抽象化
//!
//! アップロード・ステータス取得・取消・成果物ダウンロードの5操作のみを持つ。
//! 状態遷移の権限は全てサーバー側にある。

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::download_set::Artifact;
use crate::domain::entities::job::StatusSnapshot;

/// 処理APIのエラー分類
#[derive(Debug, Error)]
pub enum ApiError {
    /// サーバーに到達できない、またはHTTPレベルの失敗
    #[error("transport error: {0}")]
    Transport(String),

    /// アップロードが非2xxで拒否された（サーバー応答本文をそのまま保持）
    #[error("upload rejected (HTTP {status}): {body}")]
    Upload { status: u16, body: String },

    /// サーバーがジョブの失敗・取消を報告した
    #[error("{0}")]
    JobFailed(String),

    /// クライアント側の事前チェック失敗（助言的、サーバーが最終権限を持つ）
    #[error("validation failed: {0}")]
    Validation(String),

    /// 未知のステータス文字列（プロトコル違反）
    #[error("protocol violation: unknown job status \"{0}\"")]
    Protocol(String),
}

/// ヘルスチェック結果
///
/// サーバー定義のフィールドは全て任意。未知のフィールドは無視する。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthInfo {
    pub cold_start: Option<bool>,
    pub uptime: Option<f64>,
}

/// 処理APIリポジトリ
///
/// リモートの動画処理サービスとのHTTP契約を抽象化するtrait。
/// テストではモック実装に差し替える。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProcessingApi: Send + Sync {
    /// 動画ファイルをマルチパートで送信し、ジョブIDを受け取る
    ///
    /// # Errors
    ///
    /// 非2xx応答の場合、サーバーの応答本文を含む `ApiError::Upload` を返す
    async fn submit(&self, file: &Path) -> Result<String, ApiError>;

    /// ジョブの現在状態を1回取得する
    ///
    /// # Errors
    ///
    /// エンドポイント自体の失敗は `ApiError::Transport`、
    /// 未知のステータス文字列は `ApiError::Protocol` を返す
    async fn status(&self, job_id: &str) -> Result<StatusSnapshot, ApiError>;

    /// ジョブの取消をサーバーへ通知する（ベストエフォート）
    ///
    /// 呼び出し側（ユースケース）がエラーを飲み込む。取消は決して
    /// 呼び出し元に伝播してはならない。
    async fn cancel(&self, job_id: &str) -> Result<(), ApiError>;

    /// 成果物をダウンロードしてローカルファイルへ書き込む
    ///
    /// # Returns
    ///
    /// 書き込んだバイト数
    async fn download(&self, job_id: &str, artifact: Artifact, dest: &Path)
        -> Result<u64, ApiError>;

    /// サーバーの死活確認
    async fn health(&self) -> Result<HealthInfo, ApiError>;
}
