// src/api/parser.rs
//! Response parsing: status handling, error bodies and domain conversion.
//!
//! Parsers take an `ApiResponse<String>` so they can be exercised with JSON
//! fixtures without any HTTP.

use super::client::ApiResponse;
use super::pagination::PaginatedResponse;
use super::responses::{NotionErrorBody, RawBlock, RawPage};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, Page};
use reqwest::StatusCode;

/// Parse any Notion API response body into `T`, mapping error statuses
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_body(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        let preview: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        AppError::MalformedResponse(format!("{} (body: {})", e, preview))
    })
}

/// Turn an error response into a typed `AppError::NotionService`.
pub fn parse_error(body: &str, status: StatusCode, url: &str) -> AppError {
    match serde_json::from_str::<NotionErrorBody>(body) {
        Ok(error) => AppError::NotionService {
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
            status,
        },
        Err(_) => AppError::NotionService {
            code: NotionErrorCode::from_http_status(status.as_u16()),
            message: format!("HTTP {} from {}", status, url),
            status,
        },
    }
}

/// Parse a single block
pub fn parse_block_response(result: ApiResponse<String>) -> Result<Block, AppError> {
    let raw: RawBlock = parse_api_response(result)?;
    raw.into_domain()
}

/// Parse page metadata
pub fn parse_page_response(result: ApiResponse<String>) -> Result<Page, AppError> {
    let raw: RawPage = parse_api_response(result)?;
    Ok(raw.into_domain())
}

/// Parse one page of a block-children listing
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: PaginatedResponse<RawBlock> = parse_api_response(result)?;
    let results = response
        .results
        .into_iter()
        .map(RawBlock::into_domain)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaginatedResponse {
        results,
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

/// Give every run of consecutive numbered list items its 1-based position.
///
/// Any other block between items restarts the count.
pub fn number_list_items(blocks: &mut [Block]) {
    let mut counter = 1;
    for block in blocks.iter_mut() {
        if let Block::NumberedListItem(item) = block {
            item.number = Some(counter);
            counter += 1;
        } else {
            counter = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockCommon, NumberedListItemBlock, TextBlockContent};

    fn response(status: StatusCode, body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status,
            url: "https://api.notion.com/v1/test".to_string(),
        }
    }

    #[test]
    fn error_bodies_become_typed_codes() {
        let body = r#"{
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find page with ID: abc123"
        }"#;
        let err = parse_page_response(response(StatusCode::NOT_FOUND, body)).unwrap_err();
        match err {
            AppError::NotionService { code, .. } => {
                assert_eq!(code, NotionErrorCode::ObjectNotFound)
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unparseable_error_bodies_fall_back_to_status() {
        let err = parse_page_response(response(StatusCode::BAD_GATEWAY, "<html>")).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn numbering_restarts_after_other_blocks() {
        let item = || {
            Block::NumberedListItem(NumberedListItemBlock {
                common: BlockCommon::default(),
                content: TextBlockContent::default(),
                number: None,
            })
        };
        let mut blocks = vec![item(), item(), Block::paragraph(vec![]), item()];
        number_list_items(&mut blocks);
        let numbers: Vec<_> = blocks
            .iter()
            .map(|b| match b {
                Block::NumberedListItem(i) => i.number,
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![Some(1), Some(2), None, Some(1)]);
    }
}
