// src/plugins/numbered_lists.rs
//! Numbered list items keep the position the block source assigned, so a
//! list interrupted by other blocks restarts at 1.

use super::{BlockConverter, Converted, Plugin, PluginContext};
use crate::error::AppError;
use crate::formatting::rich_text_to_markdown;
use crate::model::Block;
use std::sync::Arc;

pub(super) fn plugin() -> Plugin {
    Plugin::new("standard numbered list transformer")
        .with_converter(&["numbered_list_item"], Arc::new(NumberedListConverter))
}

struct NumberedListConverter;

#[async_trait::async_trait]
impl BlockConverter for NumberedListConverter {
    async fn convert(
        &self,
        _ctx: &mut PluginContext<'_>,
        block: &Block,
    ) -> Result<Converted, AppError> {
        let Block::NumberedListItem(item) = block else {
            return Ok(Converted::UseDefault);
        };
        Ok(Converted::Rendered(format!(
            "{}. {}",
            item.number.unwrap_or(1),
            rich_text_to_markdown(&item.content.rich_text)
        )))
    }
}
