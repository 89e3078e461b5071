//! # Upload Options DTO
//!
//! アップロードワークフローの設定

/// アップロードワークフロー設定
///
/// Adapter層のConfigから組み立てられ、ユースケースへ渡される
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// ポーリング間隔（ミリ秒）
    pub poll_interval_ms: u64,
    /// 成果物の保存先ディレクトリ
    pub output_dir: String,
    /// 最大アップロードサイズ（バイト、0で無制限）
    pub max_upload_bytes: u64,
    /// 許可する拡張子（小文字）
    pub allowed_extensions: Vec<String>,
}

impl UploadOptions {
    /// 新しいオプションを作成
    pub fn new(
        poll_interval_ms: u64,
        output_dir: String,
        max_upload_bytes: u64,
        allowed_extensions: Vec<String>,
    ) -> Self {
        Self {
            poll_interval_ms,
            output_dir,
            max_upload_bytes,
            allowed_extensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_options_new() {
        let options = UploadOptions::new(
            1000,
            "./results".to_string(),
            0,
            vec!["mp4".to_string()],
        );

        assert_eq!(options.poll_interval_ms, 1000);
        assert_eq!(options.output_dir, "./results");
        assert_eq!(options.max_upload_bytes, 0);
        assert_eq!(options.allowed_extensions, vec!["mp4"]);
    }
}
