// src/model/blocks.rs
//! Per-type block payloads.

use super::common::BlockCommon;
use crate::types::{BlockId, PageId, RichTextItem};
use serde::{Deserialize, Serialize};

/// Text content shared by paragraphs, headings, list items, quotes and toggles
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
    pub color: String,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextItem>) -> Self {
        Self {
            rich_text,
            color: "default".to_string(),
        }
    }
}

impl Default for TextBlockContent {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading of any level; the level lives in the `Block` variant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadingBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub is_toggleable: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulletedListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Numbered list item.
///
/// `number` is the position within its run of sibling items, filled in by
/// the block source when it lists children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberedListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToggleBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuoteBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub icon: Option<Icon>,
    pub content: TextBlockContent,
}

/// Icon types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Icon {
    #[serde(rename = "emoji")]
    Emoji { emoji: String },
    #[serde(rename = "external")]
    External { external: ExternalFile },
    #[serde(rename = "file")]
    File { file: NotionFile },
    #[serde(other)]
    Other,
}

impl Icon {
    pub fn emoji(&self) -> Option<&str> {
        match self {
            Icon::Emoji { emoji } => Some(emoji),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub caption: Vec<RichTextItem>,
    pub content: TextBlockContent,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EquationBlock {
    pub common: BlockCommon,
    pub expression: String,
}

/// Blocks with no payload beyond the common fields: dividers, breadcrumbs,
/// tables of contents, column lists and columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerBlock {
    pub common: BlockCommon,
}

/// Image, video, file and PDF blocks share this media payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaBlock {
    pub common: BlockCommon,
    pub media: FileObject,
    pub caption: Vec<RichTextItem>,
    pub name: Option<String>,
}

/// Bookmarks, embeds and link previews.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UrlBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: Vec<RichTextItem>,
}

/// Child page and child database blocks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChildBlock {
    pub common: BlockCommon,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    Page(PageId),
    Database(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkToPageBlock {
    pub common: BlockCommon,
    pub target: LinkTarget,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableBlock {
    pub common: BlockCommon,
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRowBlock {
    pub common: BlockCommon,
    pub cells: Vec<Vec<RichTextItem>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncedBlock {
    pub common: BlockCommon,
    pub synced_from: Option<BlockId>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}

/// Where a media block's bytes live.
#[derive(Debug, Clone, PartialEq)]
pub enum FileObject {
    External { url: String },
    File { url: String, expiry_time: Option<String> },
    /// A hosting variant this tool does not handle; carries the API's type name.
    Unsupported { file_type: String },
}

impl FileObject {
    pub fn url(&self) -> Option<&str> {
        match self {
            FileObject::External { url } | FileObject::File { url, .. } => Some(url),
            FileObject::Unsupported { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotionFile {
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<String>,
}
