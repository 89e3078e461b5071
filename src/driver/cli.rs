//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, Subcommand};

/// 動画をポーズ処理APIへアップロードし、結果を同期するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "clipsync")]
#[command(about = "Upload videos for pose processing and sync back results", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = "./.clipsync/config.json")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List videos in the local gallery
    List {
        /// Filter by category ("all" shows everything)
        #[arg(long, default_value = "all")]
        category: String,
    },

    /// Upload a video and track the processing job
    Upload {
        /// Video file to upload
        file: String,

        /// Return right after submission without polling
        #[arg(long)]
        no_wait: bool,

        /// Skip downloading result artifacts on completion
        #[arg(long)]
        no_download: bool,
    },

    /// Show the current status of a job
    Status {
        /// Server-issued job ID
        job_id: String,
    },

    /// Request cancellation of a job (best effort)
    Cancel {
        /// Server-issued job ID
        job_id: String,
    },

    /// Download result artifacts of a completed job
    Download {
        /// Server-issued job ID
        job_id: String,
    },

    /// Check service liveness
    Health,
}
