//! # Job Entity
//!
//! 動画処理ジョブのドメインエンティティ
//!
//! ジョブの状態遷移はサーバーのみが行う。クライアントはポーリングで
//! 状態を観測するだけであり、このモジュールはその観測結果を表現する。

use chrono::{DateTime, Utc};
use serde::Serialize;

/// ジョブ状態
///
/// サーバーが報告するジョブのライフサイクル状態。
/// この5種類以外のステータス文字列はプロトコル違反として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// ステータス文字列をパースする
    ///
    /// # Returns
    ///
    /// 既知のステータスであれば `Some`、未知の文字列であれば `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "queued" => Some(Self::Queued),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// 終端状態かどうかを返す
    ///
    /// 終端状態（completed / failed / cancelled）以降に遷移は発生しない
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// ステータスのワイヤ表現を返す
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ステータススナップショット
///
/// ポーリング1回分の観測結果。進捗フィールドはサーバー定義で全て任意。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub status: JobStatus,
    pub percent: Option<f64>,
    pub loaded: Option<u64>,
    pub total: Option<u64>,
    pub error: Option<String>,
}

impl StatusSnapshot {
    /// 失敗メッセージを返す
    ///
    /// 終端状態が failed / cancelled の場合、サーバー提供のエラーメッセージ、
    /// なければ状態名を含む汎用メッセージを返す。それ以外の状態では `None`。
    pub fn failure_message(&self) -> Option<String> {
        match self.status {
            JobStatus::Failed => Some(
                self.error
                    .clone()
                    .unwrap_or_else(|| "Job failed".to_string()),
            ),
            JobStatus::Cancelled => Some(
                self.error
                    .clone()
                    .unwrap_or_else(|| "Job cancelled".to_string()),
            ),
            _ => None,
        }
    }
}

/// 動画処理ジョブのドメインエンティティ
///
/// アップロード呼び出しによって生成され、サーバー発行の `job_id` で識別される
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub job_id: String,
    pub source_file: String,
    pub submitted_at: DateTime<Utc>,
}

impl Job {
    /// 新しいジョブを作成
    ///
    /// # Arguments
    ///
    /// * `job_id` - サーバー発行のジョブID
    /// * `source_file` - アップロードしたファイルのパス
    ///
    /// # Errors
    ///
    /// `job_id` が空の場合にエラーを返す
    pub fn new(job_id: String, source_file: String) -> anyhow::Result<Self> {
        if job_id.is_empty() {
            anyhow::bail!("job_id cannot be empty");
        }

        Ok(Self {
            job_id,
            source_file,
            submitted_at: Utc::now(),
        })
    }
}
