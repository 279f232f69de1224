// src/plugins/columns.rs
//! Column layouts as flex-friendly `div`s.
//!
//! Column widths are not part of the public API; the ratio comes from the
//! column-format source and is optional.

use super::{BlockConverter, Converted, Plugin, PluginContext};
use crate::constants::COLUMN_SPACER_WIDTH;
use crate::error::AppError;
use crate::model::Block;
use std::sync::Arc;

pub(super) fn plugin() -> Plugin {
    Plugin::new("standard column list transformer")
        .with_converter(&["column_list"], Arc::new(ColumnListConverter))
        .with_converter(&["column"], Arc::new(ColumnConverter))
}

struct ColumnListConverter;

#[async_trait::async_trait]
impl BlockConverter for ColumnListConverter {
    async fn convert(
        &self,
        ctx: &mut PluginContext<'_>,
        block: &Block,
    ) -> Result<Converted, AppError> {
        if !block.has_children() {
            return Ok(Converted::Rendered(String::new()));
        }

        let columns = ctx.children(block.id()).await?;
        let mut rendered = Vec::with_capacity(columns.len());
        for column in &columns {
            rendered.push(ctx.block_to_markdown(column).await?);
        }
        Ok(Converted::Rendered(format!(
            "<div class='notion-row'>\n{}\n</div>",
            rendered.join("\n\n")
        )))
    }
}

struct ColumnConverter;

#[async_trait::async_trait]
impl BlockConverter for ColumnConverter {
    async fn convert(
        &self,
        ctx: &mut PluginContext<'_>,
        block: &Block,
    ) -> Result<Converted, AppError> {
        if !block.has_children() {
            return Ok(Converted::Rendered(String::new()));
        }

        let children = ctx.children(block.id()).await?;
        let body = ctx.blocks_to_markdown(&children).await?;

        let style = match ctx.column_formats.column_ratio(block.id()).await {
            Some(ratio) => {
                let siblings = match &block.common().parent_block {
                    Some(parent) => ctx
                        .children(parent)
                        .await?
                        .iter()
                        .filter(|b| matches!(b, Block::Column(_)))
                        .count(),
                    None => 1,
                };
                format!(" style={{{{width: '{}'}}}}", column_width(siblings, ratio))
            }
            None => String::new(),
        };

        Ok(Converted::Rendered(format!(
            "<div class='notion-column'{}>\n\n{}\n\n</div><div className='notion-spacer'></div>",
            style,
            body.trim_end()
        )))
    }
}

/// CSS width of one column among `columns` siblings taking `ratio` of the row.
pub(crate) fn column_width(columns: usize, ratio: f64) -> String {
    format!(
        "calc((100% - ({} * {})) * {})",
        COLUMN_SPACER_WIDTH,
        columns.saturating_sub(1),
        ratio
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_accounts_for_spacers_between_columns() {
        assert_eq!(
            column_width(2, 0.5),
            "calc((100% - (min(32px, 4vw) * 1)) * 0.5)"
        );
        assert_eq!(column_width(1, 1.0), "calc((100% - (min(32px, 4vw) * 0)) * 1)");
    }
}
