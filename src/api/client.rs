// src/api/client.rs
//! HTTP clients for the Notion API and for media downloads.
//!
//! Every Notion call acquires a token from the shared rate limiter and runs
//! inside `retry_with_backoff`.

use super::pagination::fetch_all_pages;
use super::parser::{self, number_list_items};
use super::rate_limit::RateLimiter;
use crate::error::AppError;
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::model::{Block, Page};
use crate::types::{ApiKey, BlockId, PageId};
use reqwest::{header, Client, Response};
use std::sync::Arc;

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey, limiter: Arc<RateLimiter>) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            limiter,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a rate-limited GET request to the specified endpoint.
    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse<String>, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        self.limiter.acquire().await;
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        extract_response_text(response).await
    }

    /// GET with retry: error statuses are parsed so retryable Notion codes
    /// are retried too.
    async fn get_checked(&self, endpoint: &str) -> Result<ApiResponse<String>, AppError> {
        retry_with_backoff(
            || async {
                let result = self.get(endpoint).await?;
                if result.status.is_success() {
                    Ok(result)
                } else {
                    Err(parser::parse_error(&result.data, result.status, &result.url))
                }
            },
            self.retry,
        )
        .await
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError> {
        let endpoint = format!("pages/{}", id.to_dashed());
        let result = self.get_checked(&endpoint).await?;
        parser::parse_page_response(result)
    }

    async fn retrieve_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError> {
        let base = format!("blocks/{}/children", parent.to_dashed());
        let mut blocks = fetch_all_pages(
            |page_size, cursor| {
                let mut endpoint = format!("{}?page_size={}", base, page_size);
                if let Some(cursor) = cursor {
                    endpoint.push_str("&start_cursor=");
                    endpoint.push_str(&cursor);
                }
                async move {
                    let result = self.get_checked(&endpoint).await?;
                    parser::parse_blocks_pagination(result)
                }
            },
            None,
        )
        .await?;
        number_list_items(&mut blocks);
        log::debug!("Fetched {} children of {}", blocks.len(), parent);
        Ok(blocks)
    }
}

/// Downloads media without Notion credentials; hosted files are pre-signed.
#[derive(Clone)]
pub struct HttpAssetFetcher {
    client: Client,
    retry: RetryPolicy,
}

impl HttpAssetFetcher {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            client: Client::builder().build()?,
            retry: RetryPolicy::default(),
        })
    }
}

#[async_trait::async_trait]
impl super::AssetFetcher for HttpAssetFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, AppError> {
        retry_with_backoff(
            || async {
                log::debug!("GET {}", url);
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(AppError::AssetFetch {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.bytes().await?.to_vec())
            },
            self.retry,
        )
        .await
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
