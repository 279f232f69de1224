// src/api/pagination.rs
//! Cursor pagination over Notion list endpoints.

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use serde::Deserialize;

/// One page of a list endpoint's results
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Fetches every page of a list endpoint using async closures directly.
pub async fn fetch_all_pages<T, F, Fut>(
    mut fetch_fn: F,
    max_pages: Option<u32>,
) -> Result<Vec<T>, AppError>
where
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        if let Some(max) = max_pages {
            if pages_fetched >= max {
                log::debug!("Reached maximum page limit: {}", max);
                break;
            }
        }

        let response = fetch_fn(NOTION_API_PAGE_SIZE as u32, cursor).await?;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        all_items.extend(response.results);
        pages_fetched += 1;

        if !has_more || cursor.is_none() {
            break;
        }
    }

    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn follows_cursors_until_exhausted() {
        let items = fetch_all_pages(
            |_size, cursor| async move {
                Ok(match cursor.as_deref() {
                    None => PaginatedResponse {
                        results: vec![1, 2],
                        next_cursor: Some("b".to_string()),
                        has_more: true,
                    },
                    Some(_) => PaginatedResponse {
                        results: vec![3],
                        next_cursor: None,
                        has_more: false,
                    },
                })
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
