//! # Upload Check Service
//!
//! アップロード前の助言的チェック
//!
//! 拡張子とサイズのチェックはUXのためのヒントに過ぎず、
//! 最終的な検証はサーバー側で行われる。

use crate::domain::repositories::processing_api::ApiError;

/// アップロード前チェックサービス
pub struct UploadCheckService;

impl UploadCheckService {
    /// ファイル名とサイズを検査する
    ///
    /// # Arguments
    ///
    /// * `file_name` - アップロード対象のファイル名
    /// * `size_bytes` - ファイルサイズ（バイト）
    /// * `allowed_extensions` - 許可する拡張子（小文字）。空なら拡張子チェックなし
    /// * `max_bytes` - 最大サイズ。0なら無制限
    ///
    /// # Errors
    ///
    /// チェックに失敗した場合に `ApiError::Validation` を返す
    pub fn check(
        file_name: &str,
        size_bytes: u64,
        allowed_extensions: &[String],
        max_bytes: u64,
    ) -> Result<(), ApiError> {
        if !allowed_extensions.is_empty() {
            let extension = file_name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .unwrap_or_default();

            if !allowed_extensions.iter().any(|e| *e == extension) {
                return Err(ApiError::Validation(format!(
                    "unsupported file type \".{}\" for {} (allowed: {})",
                    extension,
                    file_name,
                    allowed_extensions.join(", ")
                )));
            }
        }

        if max_bytes > 0 && size_bytes > max_bytes {
            return Err(ApiError::Validation(format!(
                "{} is {} bytes, exceeding the {} byte limit",
                file_name, size_bytes, max_bytes
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extensions() -> Vec<String> {
        vec!["mp4".to_string(), "mov".to_string()]
    }

    #[test]
    fn test_check_accepts_allowed_extension() {
        let result = UploadCheckService::check("clip.mp4", 1024, &extensions(), 0);
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_extension_case_insensitive() {
        let result = UploadCheckService::check("clip.MP4", 1024, &extensions(), 0);
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_rejects_unknown_extension() {
        let result = UploadCheckService::check("notes.txt", 1024, &extensions(), 0);

        let err = result.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn test_check_rejects_missing_extension() {
        let result = UploadCheckService::check("clip", 1024, &extensions(), 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_rejects_oversized_file() {
        let result = UploadCheckService::check("clip.mp4", 2048, &extensions(), 1024);

        let err = result.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(err.to_string().contains("2048"));
    }

    #[test]
    fn test_check_zero_limit_means_unlimited() {
        let result = UploadCheckService::check("clip.mp4", u64::MAX, &extensions(), 0);
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_empty_extension_list_skips_type_check() {
        let result = UploadCheckService::check("anything.bin", 1024, &[], 0);
        assert!(result.is_ok());
    }
}
