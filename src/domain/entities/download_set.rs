//! # DownloadSet Value Object
//!
//! 成果物ダウンロードURLのバリューオブジェクト
//!
//! `job_id` からの純粋な導出であり、I/Oは行わない

/// 成果物の種類
///
/// 処理完了後にサーバーが提供する3種類のアーティファクト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Video,
    Csv,
    Json,
}

impl Artifact {
    /// 全ての成果物（取得順）
    pub const ALL: [Artifact; 3] = [Artifact::Video, Artifact::Csv, Artifact::Json];

    /// URLパスセグメントを返す
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// ローカル保存時の拡張子を返す
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Video => "mp4",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// ジョブIDに基づくローカルファイル名を返す
    pub fn file_name(&self, job_id: &str) -> String {
        format!("{}.{}", job_id, self.extension())
    }
}

/// 成果物ダウンロードURLのセット
///
/// ベースURLと `job_id` から決定的に導出される3つのURL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSet {
    video: String,
    csv: String,
    json: String,
}

impl DownloadSet {
    /// 新しいダウンロードセットを導出
    ///
    /// # Arguments
    ///
    /// * `base_url` - APIベースURL（末尾スラッシュは無視される）
    /// * `job_id` - サーバー発行のジョブID
    pub fn new(base_url: &str, job_id: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            video: format!("{}/api/download/{}/video", base, job_id),
            csv: format!("{}/api/download/{}/csv", base, job_id),
            json: format!("{}/api/download/{}/json", base, job_id),
        }
    }

    pub fn video(&self) -> &str {
        &self.video
    }

    pub fn csv(&self) -> &str {
        &self.csv
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    /// 成果物に対応するURLを返す
    pub fn url(&self, artifact: Artifact) -> &str {
        match artifact {
            Artifact::Video => &self.video,
            Artifact::Csv => &self.csv,
            Artifact::Json => &self.json,
        }
    }
}
