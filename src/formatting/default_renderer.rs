// src/formatting/default_renderer.rs
//! Default Markdown for blocks whose rendering needs no child blocks.
//!
//! Container blocks (toggles, callouts, columns, tables) are rendered by the
//! engine, which can list their children.

use super::rich_text::rich_text_to_markdown;
use crate::constants::{LINK_TO_PAGE_LABEL, NOTION_PAGE_URL_PREFIX};
use crate::model::{Block, LinkTarget, MediaBlock};
use crate::types::{plain_text_of, RichTextItem};

/// Markdown for a single block, without its children.
pub fn render_leaf(block: &Block) -> String {
    match block {
        Block::Paragraph(b) => rich_text_to_markdown(&b.content.rich_text),
        Block::Heading1(b) => heading(1, &b.content.rich_text),
        Block::Heading2(b) => heading(2, &b.content.rich_text),
        Block::Heading3(b) => heading(3, &b.content.rich_text),
        Block::BulletedListItem(b) => format!("- {}", rich_text_to_markdown(&b.content.rich_text)),
        Block::NumberedListItem(b) => format!(
            "{}. {}",
            b.number.unwrap_or(1),
            rich_text_to_markdown(&b.content.rich_text)
        ),
        Block::ToDo(b) => {
            let mark = if b.checked { "x" } else { " " };
            format!("- [{}] {}", mark, rich_text_to_markdown(&b.content.rich_text))
        }
        Block::Quote(b) => quote(&rich_text_to_markdown(&b.content.rich_text)),
        Block::Callout(b) => quote(&rich_text_to_markdown(&b.content.rich_text)),
        Block::Toggle(b) => rich_text_to_markdown(&b.content.rich_text),
        Block::Code(b) => format!(
            "```{}\n{}\n```",
            b.language,
            plain_text_of(&b.content.rich_text)
        ),
        Block::Equation(b) => format!("$$\n{}\n$$", b.expression),
        Block::Divider(_) => "---".to_string(),
        Block::Image(media) => format!(
            "![{}]({})",
            plain_text_of(&media.caption),
            media.media.url().unwrap_or_default()
        ),
        Block::Video(media) => format!("[video]({})", media.media.url().unwrap_or_default()),
        Block::File(media) | Block::Pdf(media) => file_link(media),
        Block::Bookmark(b) => format!("[bookmark]({})", b.url),
        Block::Embed(b) | Block::LinkPreview(b) => format!("[embed]({})", b.url),
        Block::LinkToPage(b) => match &b.target {
            LinkTarget::Page(id) => format!(
                "[{}]({}{})",
                LINK_TO_PAGE_LABEL,
                NOTION_PAGE_URL_PREFIX,
                id.compact()
            ),
            LinkTarget::Database(_) => String::new(),
        },
        Block::TableRow(row) => table_row(&row.cells),
        Block::Breadcrumb(_)
        | Block::TableOfContents(_)
        | Block::ChildPage(_)
        | Block::ChildDatabase(_)
        | Block::Table(_)
        | Block::ColumnList(_)
        | Block::Column(_)
        | Block::Synced(_)
        | Block::Unsupported(_) => String::new(),
    }
}

fn heading(level: usize, text: &[RichTextItem]) -> String {
    format!("{} {}", "#".repeat(level), rich_text_to_markdown(text))
}

/// Prefix every line with `> `.
pub fn quote(text: &str) -> String {
    text.lines()
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn file_link(media: &MediaBlock) -> String {
    let caption = plain_text_of(&media.caption);
    let label = media
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .or_else(|| Some(caption).filter(|c| !c.is_empty()))
        .unwrap_or_else(|| "file".to_string());
    format!("[{}]({})", label, media.media.url().unwrap_or_default())
}

fn table_row(cells: &[Vec<RichTextItem>]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .map(|cell| rich_text_to_markdown(cell).replace('|', "\\|"))
        .collect();
    format!("| {} |", cells.join(" | "))
}

/// Indent every non-empty line of `text` by `prefix`.
pub fn indent_block_content(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
