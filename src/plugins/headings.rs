// src/plugins/headings.rs
//! Headings get an explicit anchor so Notion block links keep working.

use super::{BlockConverter, Converted, Plugin, PluginContext};
use crate::error::AppError;
use crate::model::Block;
use std::sync::Arc;

pub(super) fn plugin() -> Plugin {
    Plugin::new("standard heading transformer").with_converter(
        &["heading_1", "heading_2", "heading_3"],
        Arc::new(HeadingConverter),
    )
}

struct HeadingConverter;

#[async_trait::async_trait]
impl BlockConverter for HeadingConverter {
    async fn convert(
        &self,
        ctx: &mut PluginContext<'_>,
        block: &Block,
    ) -> Result<Converted, AppError> {
        let markdown = ctx.default_markdown(block).await?;
        Ok(Converted::Rendered(format!(
            "{} {{#{}}}",
            markdown.trim_end(),
            block.id().compact()
        )))
    }
}
