//! Adapter Repositories
//!
//! Repository traitの具体実装

pub mod fs_video_repository;
