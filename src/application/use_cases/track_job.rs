//! # Track Job Use Case
//!
//! ジョブ追跡ユースケース
//!
//! 固定間隔の逐次ポーリングで終端状態を待つ。次のリクエストは前の
//! リクエストが解決してからのみ発行される（オーバーラップなし）。
//! 停止シグナルはポーリングタスクへ明示的に渡され、サーバーへの
//! 取消通知とは独立している。

use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::domain::entities::job::StatusSnapshot;
use crate::domain::repositories::processing_api::{ApiError, ProcessingApi};

/// ポーリングの結果
#[derive(Debug)]
pub enum TrackOutcome {
    /// ジョブが completed で終了した（最終スナップショットを保持）
    Completed(StatusSnapshot),
    /// 停止シグナルによりポーリングを中断した
    Stopped,
}

/// ジョブ追跡ユースケース
///
/// ポーリングと取消を担当する。取消はベストエフォートであり、
/// エラーは決して呼び出し元へ伝播しない。
pub struct TrackJobUseCase<A: ProcessingApi> {
    api: Arc<A>,
}

impl<A: ProcessingApi + 'static> TrackJobUseCase<A> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `api` - 処理APIリポジトリ
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// 終端状態までポーリングする
    ///
    /// # Arguments
    ///
    /// * `job_id` - 追跡するジョブのID
    /// * `poll_interval` - ポーリング間隔
    /// * `stop` - 停止シグナル（`true` が送られたらポーリングを中断）
    /// * `on_progress` - スナップショット観測ごとに呼ばれるコールバック
    ///
    /// # Returns
    ///
    /// completed なら最終スナップショット、停止シグナルなら `Stopped`
    ///
    /// # Errors
    ///
    /// ステータス取得自体の失敗、プロトコル違反、またはジョブの
    /// failed / cancelled 終了時にエラーを返す
    pub async fn poll_until_terminal(
        &self,
        job_id: &str,
        poll_interval: Duration,
        mut stop: watch::Receiver<bool>,
        mut on_progress: impl FnMut(&StatusSnapshot),
    ) -> Result<TrackOutcome, ApiError> {
        loop {
            if *stop.borrow() {
                info!("Polling for job {} stopped by caller", job_id);
                return Ok(TrackOutcome::Stopped);
            }

            let snapshot = self.api.status(job_id).await?;
            on_progress(&snapshot);

            if snapshot.status.is_terminal() {
                return match snapshot.failure_message() {
                    Some(message) => Err(ApiError::JobFailed(message)),
                    None => Ok(TrackOutcome::Completed(snapshot)),
                };
            }

            tokio::select! {
                _ = tokio::time::sleep(poll_interval) => {}
                changed = stop.changed() => {
                    if changed.is_err() {
                        // 送信側が破棄された場合は停止要求なしとみなし、
                        // 通常の間隔で継続する
                        tokio::time::sleep(poll_interval).await;
                    }
                    // 変化の評価はループ先頭の borrow で行う
                }
            }
        }
    }

    /// ジョブの取消を通知する（ベストエフォート）
    ///
    /// 下層の呼び出しが失敗しても正常に戻る。取消は決して
    /// 呼び出し元にエラーを投げない。
    pub async fn cancel(&self, job_id: &str) {
        if let Err(e) = self.api.cancel(job_id).await {
            warn!("Cancel request for job {} failed (ignored): {}", job_id, e);
        }
    }

    /// ティアダウン時のファイアアンドフォーゲット取消
    ///
    /// デタッチしたタスクで取消を送信し、応答を待たない。
    /// ページ離脱時のビーコン送信に相当する。
    pub fn cancel_on_teardown(&self, job_id: &str) {
        let api = Arc::clone(&self.api);
        let job_id = job_id.to_string();

        tokio::spawn(async move {
            if let Err(e) = api.cancel(&job_id).await {
                warn!(
                    "Teardown cancel for job {} failed (ignored): {}",
                    job_id, e
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::domain::entities::download_set::Artifact;
    use crate::domain::entities::job::JobStatus;
    use crate::domain::repositories::processing_api::HealthInfo;

    struct SequenceApi {
        snapshots: Mutex<VecDeque<Result<StatusSnapshot, ApiError>>>,
        status_calls: AtomicUsize,
        cancel_calls: AtomicUsize,
        cancel_fails: bool,
    }

    impl SequenceApi {
        fn new(snapshots: Vec<Result<StatusSnapshot, ApiError>>) -> Self {
            Self {
                snapshots: Mutex::new(snapshots.into()),
                status_calls: AtomicUsize::new(0),
                cancel_calls: AtomicUsize::new(0),
                cancel_fails: false,
            }
        }

        fn with_failing_cancel() -> Self {
            Self {
                snapshots: Mutex::new(VecDeque::new()),
                status_calls: AtomicUsize::new(0),
                cancel_calls: AtomicUsize::new(0),
                cancel_fails: true,
            }
        }
    }

    #[async_trait]
    impl ProcessingApi for SequenceApi {
        async fn submit(&self, _file: &Path) -> Result<String, ApiError> {
            Ok("job-test".to_string())
        }

        async fn status(&self, _job_id: &str) -> Result<StatusSnapshot, ApiError> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            self.snapshots
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra status call")
        }

        async fn cancel(&self, _job_id: &str) -> Result<(), ApiError> {
            self.cancel_calls.fetch_add(1, Ordering::SeqCst);
            if self.cancel_fails {
                Err(ApiError::Transport("connection refused".to_string()))
            } else {
                Ok(())
            }
        }

        async fn download(
            &self,
            _job_id: &str,
            _artifact: Artifact,
            _dest: &Path,
        ) -> Result<u64, ApiError> {
            Ok(0)
        }

        async fn health(&self) -> Result<HealthInfo, ApiError> {
            Ok(HealthInfo::default())
        }
    }

    fn snapshot(status: JobStatus, percent: Option<f64>, error: Option<&str>) -> StatusSnapshot {
        StatusSnapshot {
            status,
            percent,
            loaded: None,
            total: None,
            error: error.map(|e| e.to_string()),
        }
    }

    fn interval() -> Duration {
        Duration::from_millis(1)
    }

    #[tokio::test]
    async fn test_poll_resolves_completed_after_exactly_two_polls() {
        let api = Arc::new(SequenceApi::new(vec![
            Ok(snapshot(JobStatus::Processing, Some(40.0), None)),
            Ok(snapshot(JobStatus::Completed, None, None)),
        ]));
        let use_case = TrackJobUseCase::new(api.clone());
        let (_tx, rx) = watch::channel(false);

        let mut observed = Vec::new();
        let outcome = use_case
            .poll_until_terminal("abc123", interval(), rx, |s| observed.push(s.status))
            .await
            .unwrap();

        match outcome {
            TrackOutcome::Completed(final_snapshot) => {
                assert_eq!(final_snapshot.status, JobStatus::Completed);
            }
            TrackOutcome::Stopped => panic!("expected completion"),
        }

        assert_eq!(api.status_calls.load(Ordering::SeqCst), 2);
        assert_eq!(observed, vec![JobStatus::Processing, JobStatus::Completed]);
    }

    #[tokio::test]
    async fn test_poll_failed_carries_server_error_verbatim() {
        let api = Arc::new(SequenceApi::new(vec![Ok(snapshot(
            JobStatus::Failed,
            None,
            Some("disk full"),
        ))]));
        let use_case = TrackJobUseCase::new(api);
        let (_tx, rx) = watch::channel(false);

        let err = use_case
            .poll_until_terminal("abc123", interval(), rx, |_| {})
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "disk full");
    }

    #[tokio::test]
    async fn test_poll_failed_without_error_names_state() {
        let api = Arc::new(SequenceApi::new(vec![Ok(snapshot(
            JobStatus::Failed,
            None,
            None,
        ))]));
        let use_case = TrackJobUseCase::new(api);
        let (_tx, rx) = watch::channel(false);

        let err = use_case
            .poll_until_terminal("abc123", interval(), rx, |_| {})
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Job failed");
    }

    #[tokio::test]
    async fn test_poll_cancelled_without_error_names_state() {
        let api = Arc::new(SequenceApi::new(vec![Ok(snapshot(
            JobStatus::Cancelled,
            None,
            None,
        ))]));
        let use_case = TrackJobUseCase::new(api);
        let (_tx, rx) = watch::channel(false);

        let err = use_case
            .poll_until_terminal("abc123", interval(), rx, |_| {})
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Job cancelled");
    }

    #[tokio::test]
    async fn test_poll_propagates_protocol_violation() {
        let api = Arc::new(SequenceApi::new(vec![Err(ApiError::Protocol(
            "exploded".to_string(),
        ))]));
        let use_case = TrackJobUseCase::new(api);
        let (_tx, rx) = watch::channel(false);

        let err = use_case
            .poll_until_terminal("abc123", interval(), rx, |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Protocol(_)));
        assert!(err.to_string().contains("exploded"));
    }

    #[tokio::test]
    async fn test_poll_propagates_transport_error() {
        let api = Arc::new(SequenceApi::new(vec![Err(ApiError::Transport(
            "connection refused".to_string(),
        ))]));
        let use_case = TrackJobUseCase::new(api);
        let (_tx, rx) = watch::channel(false);

        let err = use_case
            .poll_until_terminal("abc123", interval(), rx, |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn test_poll_stops_before_first_request_when_signalled() {
        let api = Arc::new(SequenceApi::new(vec![]));
        let use_case = TrackJobUseCase::new(api.clone());
        let (tx, rx) = watch::channel(false);

        tx.send(true).unwrap();

        let outcome = use_case
            .poll_until_terminal("abc123", interval(), rx, |_| {})
            .await
            .unwrap();

        assert!(matches!(outcome, TrackOutcome::Stopped));
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_poll_stops_between_polls_when_signalled() {
        // 1回目の観測後に停止シグナルを送る。2回目のステータス取得は
        // 発生しない。
        let api = Arc::new(SequenceApi::new(vec![Ok(snapshot(
            JobStatus::Queued,
            None,
            None,
        ))]));
        let use_case = TrackJobUseCase::new(api.clone());
        let (tx, rx) = watch::channel(false);

        let outcome = use_case
            .poll_until_terminal("abc123", Duration::from_secs(3600), rx, |_| {
                tx.send(true).unwrap();
            })
            .await
            .unwrap();

        assert!(matches!(outcome, TrackOutcome::Stopped));
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_swallows_transport_error() {
        let api = Arc::new(SequenceApi::with_failing_cancel());
        let use_case = TrackJobUseCase::new(api.clone());

        // 下層が失敗しても正常に戻る
        use_case.cancel("abc123").await;

        assert_eq!(api.cancel_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_on_teardown_fires_detached_request() {
        let api = Arc::new(SequenceApi::with_failing_cancel());
        let use_case = TrackJobUseCase::new(api.clone());

        use_case.cancel_on_teardown("abc123");

        // デタッチしたタスクの完了を待つ
        for _ in 0..100 {
            if api.cancel_calls.load(Ordering::SeqCst) == 1 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("teardown cancel was never delivered");
    }
}
