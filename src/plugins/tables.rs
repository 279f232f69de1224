// src/plugins/tables.rs
//! Tables with rich cell content: every cell goes through the converter as a
//! paragraph so links and escaping apply inside tables too.

use super::{BlockConverter, Converted, Plugin, PluginContext};
use crate::error::AppError;
use crate::formatting::MarkdownTable;
use crate::model::Block;
use std::sync::Arc;

pub(super) fn plugin() -> Plugin {
    Plugin::new("standard table transformer").with_converter(&["table"], Arc::new(TableConverter))
}

struct TableConverter;

#[async_trait::async_trait]
impl BlockConverter for TableConverter {
    async fn convert(
        &self,
        ctx: &mut PluginContext<'_>,
        block: &Block,
    ) -> Result<Converted, AppError> {
        if !block.has_children() {
            return Ok(Converted::Rendered(String::new()));
        }
        let rows = ctx.children(block.id()).await?;

        let mut table = MarkdownTable::new();
        for row in &rows {
            let Block::TableRow(row) = row else { continue };
            let mut cells = Vec::with_capacity(row.cells.len());
            for cell in &row.cells {
                let paragraph = Block::paragraph(cell.clone());
                let markdown = ctx.block_to_markdown(&paragraph).await?;
                cells.push(markdown.trim().replace('\n', "<br/>"));
            }
            table.push_row(cells);
        }
        Ok(Converted::Rendered(table.render()))
    }
}
