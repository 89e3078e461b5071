//! Clipsync - Pose Processing Upload Client
//!
//! 動画をポーズ処理APIへアップロードし、結果を同期する

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

// Clean Architecture layers
mod adapter;
mod application;
mod domain;
mod driver;

use adapter::config::Config;
use driver::{Args, ClipSyncWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Create workflow with injected dependencies
    let workflow = ClipSyncWorkflow::new(config)?;

    workflow.execute(args).await
}
