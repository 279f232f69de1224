// src/api/unofficial.rs
//! Column width ratios from Notion's internal record API.
//!
//! The public API does not report how wide each column of a column list
//! is. The web client's `syncRecordValues` endpoint does, as
//! `format.column_ratio` on the column's record.

use super::rate_limit::RateLimiter;
use crate::error::AppError;
use crate::types::BlockId;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;

const SYNC_RECORD_VALUES_URL: &str = "https://www.notion.so/api/v3/syncRecordValues";

pub struct UnofficialColumnSource {
    client: Client,
    limiter: Arc<RateLimiter>,
}

impl UnofficialColumnSource {
    pub fn new(limiter: Arc<RateLimiter>) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::builder().build()?,
            limiter,
        })
    }

    async fn fetch_record(&self, column: &BlockId) -> Result<Value, AppError> {
        let body = json!({
            "requests": [{
                "pointer": { "table": "block", "id": column.to_dashed() },
                "version": -1
            }]
        });
        self.limiter.acquire().await;
        let response = self
            .client
            .post(SYNC_RECORD_VALUES_URL)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::AssetFetch {
                url: SYNC_RECORD_VALUES_URL.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

/// Find `format.column_ratio` for `column` in a `syncRecordValues` response.
///
/// Newer responses wrap the record in a second `value` layer; both shapes
/// are accepted.
pub fn column_ratio_from_record(record: &Value, column: &BlockId) -> Option<f64> {
    let entry = record
        .get("recordMap")?
        .get("block")?
        .get(column.to_dashed())?
        .get("value")?;
    let ratio = |v: &Value| v.get("format")?.get("column_ratio")?.as_f64();
    ratio(entry).or_else(|| entry.get("value").and_then(ratio))
}

#[async_trait::async_trait]
impl super::ColumnFormatSource for UnofficialColumnSource {
    async fn column_ratio(&self, column: &BlockId) -> Option<f64> {
        match self.fetch_record(column).await {
            Ok(record) => column_ratio_from_record(&record, column),
            Err(e) => {
                log::warn!("Could not read column format for {}: {}", column, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMN: &str = "3f1a2b3c-4d5e-4f60-8a7b-9c0d1e2f3a4b";

    #[test]
    fn reads_ratio_from_flat_record() {
        let record = json!({
            "recordMap": { "block": { COLUMN: { "value": { "format": { "column_ratio": 0.25 } } } } }
        });
        assert_eq!(
            column_ratio_from_record(&record, &BlockId::from_api(COLUMN)),
            Some(0.25)
        );
    }

    #[test]
    fn reads_ratio_from_nested_record() {
        let record = json!({
            "recordMap": { "block": { COLUMN: { "value": { "value": { "format": { "column_ratio": 0.5 } } } } } }
        });
        assert_eq!(
            column_ratio_from_record(&record, &BlockId::from_api(COLUMN)),
            Some(0.5)
        );
    }

    #[test]
    fn missing_format_means_no_ratio() {
        let record = json!({ "recordMap": { "block": {} } });
        assert_eq!(column_ratio_from_record(&record, &BlockId::from_api(COLUMN)), None);
    }
}
