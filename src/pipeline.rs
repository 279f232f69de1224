// src/pipeline.rs
//! Pipeline capability traits: the two stages of a docs run.
//!
//! Each trait describes a single capability, so each stage can be tested
//! in isolation.

use crate::analytics::RunSummary;
use crate::error::AppError;
use crate::model::Page;
use crate::types::PageId;

/// Finds the pages to publish below an outline root.
#[async_trait::async_trait]
pub trait PageDiscovery {
    async fn discover(&self, root: &PageId) -> Result<Vec<Page>, AppError>;
}

/// Converts and writes discovered pages, then removes stale output.
#[async_trait::async_trait]
pub trait PagePublisher {
    async fn publish(&self, pages: &[Page]) -> Result<RunSummary, AppError>;
}
