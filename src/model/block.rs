// src/model/block.rs
use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, RichTextItem};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Breadcrumb($pattern) => $result,
            Block::TableOfContents($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Pdf($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::LinkPreview($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::LinkToPage($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Synced($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// Block represents all Notion block types this tool understands
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Divider(MarkerBlock),
    Breadcrumb(MarkerBlock),
    TableOfContents(MarkerBlock),
    Image(MediaBlock),
    Video(MediaBlock),
    File(MediaBlock),
    Pdf(MediaBlock),
    Bookmark(UrlBlock),
    Embed(UrlBlock),
    LinkPreview(UrlBlock),
    ChildPage(ChildBlock),
    ChildDatabase(ChildBlock),
    LinkToPage(LinkToPageBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(MarkerBlock),
    Column(MarkerBlock),
    Synced(SyncedBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    /// Check if block has children
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get block type name as the Notion API spells it
    pub fn block_type(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Equation(_) => "equation",
            Block::Divider(_) => "divider",
            Block::Breadcrumb(_) => "breadcrumb",
            Block::TableOfContents(_) => "table_of_contents",
            Block::Image(_) => "image",
            Block::Video(_) => "video",
            Block::File(_) => "file",
            Block::Pdf(_) => "pdf",
            Block::Bookmark(_) => "bookmark",
            Block::Embed(_) => "embed",
            Block::LinkPreview(_) => "link_preview",
            Block::ChildPage(_) => "child_page",
            Block::ChildDatabase(_) => "child_database",
            Block::LinkToPage(_) => "link_to_page",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Synced(_) => "synced_block",
            Block::Unsupported(_) => "unsupported",
        }
    }

    /// The main text of a text-bearing block.
    pub fn rich_text(&self) -> Option<&[RichTextItem]> {
        match self {
            Block::Paragraph(b) => Some(&b.content.rich_text),
            Block::Heading1(b) | Block::Heading2(b) | Block::Heading3(b) => {
                Some(&b.content.rich_text)
            }
            Block::BulletedListItem(b) => Some(&b.content.rich_text),
            Block::NumberedListItem(b) => Some(&b.content.rich_text),
            Block::ToDo(b) => Some(&b.content.rich_text),
            Block::Toggle(b) => Some(&b.content.rich_text),
            Block::Quote(b) => Some(&b.content.rich_text),
            Block::Callout(b) => Some(&b.content.rich_text),
            Block::Code(b) => Some(&b.content.rich_text),
            _ => None,
        }
    }

    /// Every rich-text sequence the block carries: main text, captions and
    /// table cells.
    pub fn rich_text_runs_mut(&mut self) -> Vec<&mut Vec<RichTextItem>> {
        match self {
            Block::Paragraph(b) => vec![&mut b.content.rich_text],
            Block::Heading1(b) | Block::Heading2(b) | Block::Heading3(b) => {
                vec![&mut b.content.rich_text]
            }
            Block::BulletedListItem(b) => vec![&mut b.content.rich_text],
            Block::NumberedListItem(b) => vec![&mut b.content.rich_text],
            Block::ToDo(b) => vec![&mut b.content.rich_text],
            Block::Toggle(b) => vec![&mut b.content.rich_text],
            Block::Quote(b) => vec![&mut b.content.rich_text],
            Block::Callout(b) => vec![&mut b.content.rich_text],
            Block::Code(b) => vec![&mut b.content.rich_text, &mut b.caption],
            Block::Image(b) | Block::Video(b) | Block::File(b) | Block::Pdf(b) => {
                vec![&mut b.caption]
            }
            Block::Bookmark(b) | Block::Embed(b) | Block::LinkPreview(b) => vec![&mut b.caption],
            Block::TableRow(b) => b.cells.iter_mut().collect(),
            _ => Vec::new(),
        }
    }

    /// Whether the block's own rendering is responsible for its children.
    ///
    /// For every other block with children the engine renders the children
    /// after the block itself.
    pub fn renders_own_children(&self) -> bool {
        matches!(
            self,
            Block::ColumnList(_)
                | Block::Column(_)
                | Block::Callout(_)
                | Block::Table(_)
                | Block::Toggle(_)
                | Block::ChildPage(_)
                | Block::ChildDatabase(_)
        )
    }

    /// Whether nested children are indented under the block.
    pub fn indents_children(&self) -> bool {
        matches!(
            self,
            Block::BulletedListItem(_)
                | Block::NumberedListItem(_)
                | Block::ToDo(_)
                | Block::Paragraph(_)
                | Block::Quote(_)
        )
    }

    /// List items are separated by single newlines rather than blank lines.
    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            Block::BulletedListItem(_) | Block::NumberedListItem(_) | Block::ToDo(_)
        )
    }

    /// A paragraph holding `runs`.
    pub fn paragraph(runs: Vec<RichTextItem>) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(runs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_type_names_match_the_api() {
        let heading = Block::Heading2(HeadingBlock::default());
        assert_eq!(heading.block_type(), "heading_2");
        let synced = Block::Synced(SyncedBlock::default());
        assert_eq!(synced.block_type(), "synced_block");
    }

    #[test]
    fn table_rows_expose_every_cell_for_rewriting() {
        let mut row = Block::TableRow(TableRowBlock {
            common: BlockCommon::default(),
            cells: vec![
                vec![RichTextItem::plain_text("a")],
                vec![RichTextItem::plain_text("b")],
            ],
        });
        assert_eq!(row.rich_text_runs_mut().len(), 2);
    }

    #[test]
    fn containers_render_their_own_children() {
        assert!(Block::Callout(CalloutBlock::default()).renders_own_children());
        assert!(!Block::paragraph(vec![]).renders_own_children());
        assert!(Block::paragraph(vec![]).indents_children());
    }
}
