// src/api/memory.rs
//! In-memory workspace: pages, block trees, asset bytes and column ratios
//! held in maps. Used for fixture-driven runs and tests.

use super::parser::number_list_items;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, Page};
use crate::types::{BlockId, PageId};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
pub struct MemoryWorkspace {
    pages: HashMap<String, Page>,
    children: HashMap<String, Vec<Block>>,
    assets: HashMap<String, Vec<u8>>,
    column_ratios: HashMap<String, f64>,
    fetched_assets: Mutex<Vec<String>>,
    children_requests: Mutex<Vec<String>>,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.insert(page.id.as_str().to_string(), page);
        self
    }

    pub fn with_children(mut self, parent: &str, blocks: Vec<Block>) -> Self {
        self.children.insert(parent.to_string(), blocks);
        self
    }

    pub fn with_asset(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.assets.insert(url.to_string(), bytes);
        self
    }

    pub fn with_column_ratio(mut self, column: &str, ratio: f64) -> Self {
        self.column_ratios.insert(column.to_string(), ratio);
        self
    }

    /// URLs passed to `fetch_bytes`, in call order.
    pub fn fetched_assets(&self) -> Vec<String> {
        self.fetched_assets.lock().clone()
    }

    /// Parents whose children were listed, in call order.
    pub fn children_requests(&self) -> Vec<String> {
        self.children_requests.lock().clone()
    }

    fn not_found(id: &str) -> AppError {
        AppError::NotionService {
            code: NotionErrorCode::ObjectNotFound,
            message: format!("Could not find object with ID: {}", id),
            status: reqwest::StatusCode::NOT_FOUND,
        }
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for MemoryWorkspace {
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError> {
        self.pages
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| Self::not_found(id.as_str()))
    }

    async fn retrieve_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError> {
        self.children_requests.lock().push(parent.as_str().to_string());
        let mut blocks = self.children.get(parent.as_str()).cloned().unwrap_or_default();
        number_list_items(&mut blocks);
        Ok(blocks)
    }
}

#[async_trait::async_trait]
impl super::AssetFetcher for MemoryWorkspace {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, AppError> {
        self.fetched_assets.lock().push(url.to_string());
        self.assets
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::AssetFetch {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[async_trait::async_trait]
impl super::ColumnFormatSource for MemoryWorkspace {
    async fn column_ratio(&self, column: &BlockId) -> Option<f64> {
        self.column_ratios.get(column.as_str()).copied()
    }
}
