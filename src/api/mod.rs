// src/api/mod.rs
//! Notion API interaction: the ability to retrieve content from a workspace.
//!
//! Business logic depends on the traits here, never on HTTP details. The
//! HTTP implementations rate-limit and retry internally, so callers only see
//! success or a terminal error.

pub mod client;
pub mod memory;
mod pagination;
pub mod parser;
pub mod rate_limit;
mod responses;
pub mod unofficial;

use crate::error::AppError;
use crate::model::{Block, Page};
use crate::types::{BlockId, PageId};

/// The ability to retrieve pages and block children from a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// Page metadata: properties and the kind of parent.
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError>;

    /// Every child of a block or page, across all result pages, with
    /// numbered list items numbered.
    async fn retrieve_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError>;
}

/// The ability to download the bytes behind a media URL.
#[async_trait::async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, AppError>;
}

/// Column width ratios, which the public API does not expose.
#[async_trait::async_trait]
pub trait ColumnFormatSource: Send + Sync {
    /// The column's share of its row, if known. Lookup failures are logged
    /// and reported as `None`.
    async fn column_ratio(&self, column: &BlockId) -> Option<f64>;
}

// Re-export the public interface
pub use client::{ApiResponse, HttpAssetFetcher, NotionHttpClient};
pub use memory::MemoryWorkspace;
pub use rate_limit::RateLimiter;
pub use unofficial::UnofficialColumnSource;
