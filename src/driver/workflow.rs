//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション
//!
//! 依存性を組み立て、CLIのサブコマンドをユースケースへ振り分ける。

use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::adapter::config::Config;
use crate::adapter::http::api_client::HttpProcessingApi;
use crate::adapter::repositories::fs_video_repository::FsVideoRepository;
use crate::application::dto::upload_options::UploadOptions;
use crate::application::use_cases::fetch_results::FetchResultsUseCase;
use crate::application::use_cases::submit_upload::SubmitUploadUseCase;
use crate::application::use_cases::track_job::{TrackJobUseCase, TrackOutcome};
use crate::domain::entities::download_set::DownloadSet;
use crate::domain::repositories::processing_api::ProcessingApi;
use crate::domain::repositories::video_repository::VideoRepository;
use crate::domain::services::gallery::GalleryStore;

use super::cli::{Args, Command};

/// ClipSyncワークフロー
pub struct ClipSyncWorkflow {
    config: Config,
    api: Arc<HttpProcessingApi>,
    video_repository: Arc<FsVideoRepository>,
}

impl ClipSyncWorkflow {
    /// 依存性を注入してワークフローを作成
    pub fn new(config: Config) -> Result<Self> {
        let api = Arc::new(HttpProcessingApi::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?);
        let video_repository = Arc::new(FsVideoRepository::new());

        Ok(Self {
            config,
            api,
            video_repository,
        })
    }

    /// サブコマンドを実行する
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Using API base URL: {}", self.config.base_url);

        match args.command {
            Command::List { category } => self.run_list(&category).await,
            Command::Upload {
                file,
                no_wait,
                no_download,
            } => self.run_upload(&file, no_wait, no_download).await,
            Command::Status { job_id } => self.run_status(&job_id).await,
            Command::Cancel { job_id } => self.run_cancel(&job_id).await,
            Command::Download { job_id } => self.run_download(&job_id).await,
            Command::Health => self.run_health().await,
        }
    }

    fn upload_options(&self) -> UploadOptions {
        UploadOptions::new(
            self.config.poll_interval_ms,
            self.config.output_dir.clone(),
            self.config.max_upload_bytes,
            self.config.allowed_extensions.clone(),
        )
    }

    async fn run_list(&self, category: &str) -> Result<()> {
        let videos = self.video_repository.scan(&self.config.media_dir).await?;
        let mut store = GalleryStore::new(videos);
        store.set_filter(category);

        println!(
            "✓ {} videos in library ({} categories)",
            store.len(),
            store.categories().len()
        );

        let visible = store.visible();
        if visible.is_empty() {
            println!(
                "⚠ No videos for category \"{}\" in {}",
                store.active_category(),
                self.config.media_dir
            );
            return Ok(());
        }

        for video in visible {
            println!("  [{}] {} ({})", video.category, video.title, video.id);
        }

        Ok(())
    }

    async fn run_upload(&self, file: &str, no_wait: bool, no_download: bool) -> Result<()> {
        let submit = SubmitUploadUseCase::new(self.api.clone());
        let track = TrackJobUseCase::new(self.api.clone());
        let options = self.upload_options();

        let path = PathBuf::from(shellexpand::tilde(file).as_ref());
        let job = submit.execute(&path, &options).await?;

        println!("✓ Submitted {} as job {}", path.display(), job.job_id);

        if no_wait {
            println!("  Check progress with: clipsync status {}", job.job_id);
            return Ok(());
        }

        // Ctrl-C を停止シグナルへ接続
        let (stop_tx, stop_rx) = watch::channel(false);
        let signal_task = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = stop_tx.send(true);
            }
        });

        let outcome = track
            .poll_until_terminal(
                &job.job_id,
                Duration::from_millis(options.poll_interval_ms),
                stop_rx,
                |snapshot| match snapshot.percent {
                    Some(percent) => println!("  {} {:.0}%", snapshot.status, percent),
                    None => println!("  {}", snapshot.status),
                },
            )
            .await;

        signal_task.abort();

        match outcome {
            Ok(TrackOutcome::Completed(_)) => {
                println!("✓ Job {} completed", job.job_id);

                let urls = DownloadSet::new(&self.config.base_url, &job.job_id);
                println!("  Results: {}", urls.video());
                println!("           {}", urls.csv());
                println!("           {}", urls.json());

                if !no_download {
                    self.run_download(&job.job_id).await?;
                }

                Ok(())
            }
            Ok(TrackOutcome::Stopped) => {
                println!(
                    "⚠ Polling stopped. Sending best-effort cancel for job {}",
                    job.job_id
                );
                track.cancel(&job.job_id).await;
                Ok(())
            }
            Err(e) => {
                // ポーリングが続行不能になった場合もサーバーへは通知しておく
                track.cancel_on_teardown(&job.job_id);
                Err(e.into())
            }
        }
    }

    async fn run_status(&self, job_id: &str) -> Result<()> {
        let snapshot = self.api.status(job_id).await?;

        println!("✓ Job {}: {}", job_id, snapshot.status);

        if let Some(percent) = snapshot.percent {
            println!("  Progress: {:.0}%", percent);
        }
        if let (Some(loaded), Some(total)) = (snapshot.loaded, snapshot.total) {
            println!("  Frames: {}/{}", loaded, total);
        }
        if let Some(error) = &snapshot.error {
            println!("  Error: {}", error);
        }
        if snapshot.status == crate::domain::entities::job::JobStatus::Completed {
            let urls = DownloadSet::new(&self.config.base_url, job_id);
            println!("  Results: {}", urls.video());
        }

        Ok(())
    }

    async fn run_cancel(&self, job_id: &str) -> Result<()> {
        let track = TrackJobUseCase::new(self.api.clone());

        // 取消はベストエフォート。失敗しても呼び出し元へは伝播しない。
        track.cancel(job_id).await;

        println!("✓ Cancel requested for job {}", job_id);

        Ok(())
    }

    async fn run_download(&self, job_id: &str) -> Result<()> {
        let fetch = FetchResultsUseCase::new(self.api.clone());

        let saved = fetch
            .execute(job_id, Path::new(&self.config.output_dir))
            .await?;

        for fetched in &saved {
            println!(
                "  ✓ {} -> {} ({} bytes)",
                fetched.artifact.as_str(),
                fetched.path.display(),
                fetched.bytes
            );
        }

        Ok(())
    }

    async fn run_health(&self) -> Result<()> {
        let info = self.api.health().await?;

        println!("✓ Service reachable at {}", self.config.base_url);

        if info.cold_start == Some(true) {
            println!("  Cold start in progress, first job may be slow");
        }
        if let Some(uptime) = info.uptime {
            println!("  Uptime: {:.0}s", uptime);
        }

        Ok(())
    }
}
