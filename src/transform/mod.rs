// src/transform/mod.rs
//! Turning one page's blocks into its finished Markdown document.

mod frontmatter;
mod rewrite;

pub use frontmatter::frontmatter;
pub use rewrite::{apply_regex_modifications, fix_links};

use crate::error::AppError;
use crate::model::Block;
use crate::plugins::PluginContext;

/// Markdown body of a page, imports first when any plugin asked for one.
///
/// Child pages are published as pages of their own, so their blocks are
/// dropped here.
pub async fn markdown_for_page(
    ctx: &mut PluginContext<'_>,
    blocks: Vec<Block>,
) -> Result<String, AppError> {
    let plugins = ctx.plugins();
    let mut blocks: Vec<Block> = blocks
        .into_iter()
        .filter(|b| !matches!(b, Block::ChildPage(_)))
        .collect();
    for block in &mut blocks {
        plugins.modify_block(block);
    }

    let markdown = ctx.blocks_to_markdown(&blocks).await?;
    let markdown = fix_links(ctx, &markdown);
    let markdown = apply_regex_modifications(ctx, &markdown).await?;

    let body = markdown.trim_end();
    if ctx.imports.is_empty() {
        return Ok(format!("{}\n", body));
    }
    Ok(format!("{}\n{}\n", ctx.imports.join("\n"), body))
}

/// The complete file: front matter, a blank line, then the body.
pub async fn page_document(
    ctx: &mut PluginContext<'_>,
    blocks: Vec<Block>,
) -> Result<String, AppError> {
    let body = markdown_for_page(ctx, blocks).await?;
    Ok(format!("{}\n{}", frontmatter(ctx.page)?, body))
}
