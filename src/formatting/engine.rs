// src/formatting/engine.rs
//! Recursive block-to-Markdown conversion.
//!
//! Each block goes to the custom converter registered for its type, falling
//! back to the default rendering. Children are listed lazily from the block
//! source and rendered under their parent unless the parent's own rendering
//! already consumed them.

use super::default_renderer::{indent_block_content, quote, render_leaf};
use super::rich_text::rich_text_to_markdown;
use super::table::MarkdownTable;
use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::error::AppError;
use crate::model::Block;
use crate::plugins::{Converted, PluginContext, PluginRegistry};
use futures::future::BoxFuture;

const CHILD_INDENT: &str = "    ";

#[derive(Clone, Copy)]
pub struct ConversionEngine<'a> {
    plugins: &'a PluginRegistry,
}

impl<'a> ConversionEngine<'a> {
    pub fn new(plugins: &'a PluginRegistry) -> Self {
        Self { plugins }
    }

    pub fn plugins(&self) -> &'a PluginRegistry {
        self.plugins
    }

    /// Render sibling blocks. Consecutive list items share a line break,
    /// everything else is separated by a blank line.
    pub fn render_blocks<'c>(
        self,
        ctx: &'c mut PluginContext<'a>,
        blocks: &'c [Block],
    ) -> BoxFuture<'c, Result<String, AppError>> {
        Box::pin(async move {
            let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
            for (index, block) in blocks.iter().enumerate() {
                let markdown = self.render_block(ctx, block).await?;
                let markdown = markdown.trim_end_matches('\n');
                if markdown.is_empty() {
                    continue;
                }
                output.push_str(markdown);
                let next_is_list = blocks
                    .get(index + 1)
                    .map(Block::is_list_item)
                    .unwrap_or(false);
                if block.is_list_item() && next_is_list {
                    output.push('\n');
                } else {
                    output.push_str("\n\n");
                }
            }
            Ok(output)
        })
    }

    /// Render one block and, unless it handles them itself, its children.
    pub fn render_block<'c>(
        self,
        ctx: &'c mut PluginContext<'a>,
        block: &'c Block,
    ) -> BoxFuture<'c, Result<String, AppError>> {
        Box::pin(async move {
            let rendered = match self.plugins.converter_for(block.block_type()) {
                Some(converter) => match converter.convert(ctx, block).await? {
                    Converted::Rendered(markdown) => markdown,
                    Converted::UseDefault => self.render_default(ctx, block).await?,
                },
                None => self.render_default(ctx, block).await?,
            };

            if !block.has_children() || block.renders_own_children() {
                return Ok(rendered);
            }

            let children = self.render_children(ctx, block).await?;
            Ok(attach_children(block, rendered, children.trim_end()))
        })
    }

    /// The built-in rendering of `block`, bypassing custom converters.
    pub fn render_default<'c>(
        self,
        ctx: &'c mut PluginContext<'a>,
        block: &'c Block,
    ) -> BoxFuture<'c, Result<String, AppError>> {
        Box::pin(async move {
            match block {
                Block::Toggle(toggle) => {
                    let summary = rich_text_to_markdown(&toggle.content.rich_text);
                    let body = self.render_children(ctx, block).await?;
                    Ok(format!(
                        "<details>\n<summary>{}</summary>\n\n{}\n\n</details>",
                        summary,
                        body.trim_end()
                    ))
                }
                Block::Callout(callout) => {
                    let text = rich_text_to_markdown(&callout.content.rich_text);
                    let text = match callout.icon.as_ref().and_then(|i| i.emoji()) {
                        Some(emoji) => format!("{} {}", emoji, text),
                        None => text,
                    };
                    let body = self.render_children(ctx, block).await?;
                    let body = body.trim_end();
                    if body.is_empty() {
                        Ok(quote(&text))
                    } else {
                        Ok(quote(&format!("{}\n\n{}", text, body)))
                    }
                }
                Block::ColumnList(_) | Block::Column(_) => {
                    let body = self.render_children(ctx, block).await?;
                    Ok(body.trim_end().to_string())
                }
                Block::Table(_) => {
                    let rows = if block.has_children() {
                        ctx.children(block.id()).await?
                    } else {
                        Vec::new()
                    };
                    let mut table = MarkdownTable::new();
                    for row in &rows {
                        if let Block::TableRow(row) = row {
                            table.push_row(
                                row.cells.iter().map(|c| rich_text_to_markdown(c)).collect(),
                            );
                        }
                    }
                    Ok(table.render())
                }
                _ => Ok(render_leaf(block)),
            }
        })
    }

    async fn render_children(
        self,
        ctx: &mut PluginContext<'a>,
        block: &Block,
    ) -> Result<String, AppError> {
        if !block.has_children() {
            return Ok(String::new());
        }
        let children = ctx.children(block.id()).await?;
        self.render_blocks(ctx, &children).await
    }
}

fn attach_children(block: &Block, rendered: String, children: &str) -> String {
    if children.is_empty() {
        rendered
    } else if rendered.is_empty() {
        children.to_string()
    } else if block.indents_children() {
        format!(
            "{}\n{}",
            rendered,
            indent_block_content(children, CHILD_INDENT)
        )
    } else {
        format!("{}\n\n{}", rendered, children)
    }
}
