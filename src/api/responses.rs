// src/api/responses.rs
//! Raw API response shapes and their conversion into the domain model.
//!
//! Blocks are deserialized in two steps: the envelope (`id`, `type`,
//! `has_children`, parent) first, then the payload stored under the key
//! named by `type`. Unknown block types become `Block::Unsupported`.

use crate::error::AppError;
use crate::model::{
    Block, BlockCommon, BulletedListItemBlock, CalloutBlock, ChildBlock, CodeBlock, DateValue,
    EquationBlock, FileObject, HeadingBlock, Icon, LinkTarget, LinkToPageBlock, MarkerBlock,
    MediaBlock, NumberedListItemBlock, Page, PageKind, ParagraphBlock, PropertyValue, QuoteBlock,
    SyncedBlock, TableBlock, TableRowBlock, TextBlockContent, ToDoBlock, ToggleBlock,
    UnsupportedBlock, UrlBlock,
};
use crate::types::{Annotations, BlockId, Link, MentionType, PageId, RichTextItem, RichTextType};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Error body the API returns with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct NotionErrorBody {
    #[serde(default)]
    pub status: u16,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawParent {
    PageId { page_id: String },
    DatabaseId { database_id: String },
    BlockId { block_id: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub id: String,
    #[serde(default)]
    pub parent: Option<RawParent>,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    pub id: String,
    #[serde(default)]
    pub parent: Option<RawParent>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub properties: indexmap::IndexMap<String, RawProperty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProperty {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRichText {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<RawText>,
    #[serde(default)]
    pub mention: Option<Value>,
    #[serde(default)]
    pub equation: Option<RawEquation>,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawText {
    pub content: String,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEquation {
    pub expression: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawTextPayload {
    #[serde(default)]
    rich_text: Vec<RawRichText>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    is_toggleable: bool,
    #[serde(default)]
    checked: bool,
    #[serde(default)]
    icon: Option<Icon>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    caption: Vec<RawRichText>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawFile {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    external: Option<RawUrl>,
    #[serde(default)]
    file: Option<RawHostedFile>,
    #[serde(default)]
    caption: Vec<RawRichText>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawUrl {
    url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawHostedFile {
    url: String,
    #[serde(default)]
    expiry_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawUrlPayload {
    #[serde(default)]
    url: String,
    #[serde(default)]
    caption: Vec<RawRichText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawTitle {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawLinkToPage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    page_id: Option<String>,
    #[serde(default)]
    database_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawTable {
    #[serde(default)]
    table_width: usize,
    #[serde(default)]
    has_column_header: bool,
    #[serde(default)]
    has_row_header: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawTableRow {
    #[serde(default)]
    cells: Vec<Vec<RawRichText>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawSynced {
    #[serde(default)]
    synced_from: Option<RawSyncedFrom>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawSyncedFrom {
    block_id: String,
}

impl RawRichText {
    pub fn into_domain(self) -> RichTextItem {
        let text_type = match self.kind.as_str() {
            "equation" => RichTextType::Equation {
                expression: self
                    .equation
                    .map(|e| e.expression)
                    .unwrap_or_else(|| self.plain_text.clone()),
            },
            "mention" => RichTextType::Mention(mention_type(self.mention.as_ref())),
            _ => {
                let (content, link) = match self.text {
                    Some(text) => (text.content, text.link),
                    None => (self.plain_text.clone(), None),
                };
                RichTextType::Text { content, link }
            }
        };
        RichTextItem {
            text_type,
            annotations: self.annotations,
            plain_text: self.plain_text,
            href: self.href,
        }
    }
}

fn mention_type(mention: Option<&Value>) -> MentionType {
    let Some(mention) = mention else {
        return MentionType::Other("unknown".to_string());
    };
    let kind = mention.get("type").and_then(Value::as_str).unwrap_or("unknown");
    let body = mention.get(kind);
    let field = |name: &str| {
        body.and_then(|b| b.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    match kind {
        "page" => match field("id") {
            Some(id) => MentionType::Page {
                id: PageId::from_api(id),
            },
            None => MentionType::Other(kind.to_string()),
        },
        "database" => MentionType::Database {
            id: field("id").unwrap_or_default(),
        },
        "user" => MentionType::User { name: field("name") },
        "date" => MentionType::Date {
            start: field("start").unwrap_or_default(),
            end: field("end"),
        },
        "link_preview" => MentionType::LinkPreview {
            url: field("url").unwrap_or_default(),
        },
        other => MentionType::Other(other.to_string()),
    }
}

fn runs(raw: Vec<RawRichText>) -> Vec<RichTextItem> {
    raw.into_iter().map(RawRichText::into_domain).collect()
}

impl RawBlock {
    fn payload<T: DeserializeOwned + Default>(&self) -> Result<T, AppError> {
        match self.payload.get(&self.block_type) {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                AppError::MalformedResponse(format!(
                    "{} block {}: {}",
                    self.block_type, self.id, e
                ))
            }),
            None => Ok(T::default()),
        }
    }

    fn media(&self, common: BlockCommon) -> Result<MediaBlock, AppError> {
        let raw: RawFile = match self.payload.get(&self.block_type) {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                AppError::MalformedResponse(format!(
                    "{} block {}: {}",
                    self.block_type, self.id, e
                ))
            })?,
            None => {
                return Err(AppError::MalformedResponse(format!(
                    "{} block {} has no media payload",
                    self.block_type, self.id
                )))
            }
        };
        let media = match (raw.kind.as_str(), raw.external, raw.file) {
            ("external", Some(external), _) => FileObject::External { url: external.url },
            ("file", _, Some(file)) => FileObject::File {
                url: file.url,
                expiry_time: file.expiry_time,
            },
            (other, _, _) => FileObject::Unsupported {
                file_type: other.to_string(),
            },
        };
        Ok(MediaBlock {
            common,
            media,
            caption: runs(raw.caption),
            name: raw.name,
        })
    }

    /// Convert the raw envelope into a domain block.
    pub fn into_domain(self) -> Result<Block, AppError> {
        let parent_block = match &self.parent {
            Some(RawParent::BlockId { block_id }) => Some(BlockId::from_api(block_id.clone())),
            _ => None,
        };
        let common = BlockCommon {
            id: BlockId::from_api(self.id.clone()),
            parent_block,
            has_children: self.has_children,
            archived: self.archived,
        };

        let text = |raw: RawTextPayload| TextBlockContent {
            rich_text: runs(raw.rich_text),
            color: raw.color.unwrap_or_else(|| "default".to_string()),
        };

        let block = match self.block_type.as_str() {
            "paragraph" => Block::Paragraph(ParagraphBlock {
                common,
                content: text(self.payload()?),
            }),
            "heading_1" | "heading_2" | "heading_3" => {
                let raw: RawTextPayload = self.payload()?;
                let heading = HeadingBlock {
                    common,
                    is_toggleable: raw.is_toggleable,
                    content: text(raw),
                };
                match self.block_type.as_str() {
                    "heading_1" => Block::Heading1(heading),
                    "heading_2" => Block::Heading2(heading),
                    _ => Block::Heading3(heading),
                }
            }
            "bulleted_list_item" => Block::BulletedListItem(BulletedListItemBlock {
                common,
                content: text(self.payload()?),
            }),
            "numbered_list_item" => Block::NumberedListItem(NumberedListItemBlock {
                common,
                content: text(self.payload()?),
                number: None,
            }),
            "to_do" => {
                let raw: RawTextPayload = self.payload()?;
                Block::ToDo(ToDoBlock {
                    common,
                    checked: raw.checked,
                    content: text(raw),
                })
            }
            "toggle" => Block::Toggle(ToggleBlock {
                common,
                content: text(self.payload()?),
            }),
            "quote" => Block::Quote(QuoteBlock {
                common,
                content: text(self.payload()?),
            }),
            "callout" => {
                let raw: RawTextPayload = self.payload()?;
                Block::Callout(CalloutBlock {
                    common,
                    icon: raw.icon.clone(),
                    content: text(raw),
                })
            }
            "code" => {
                let raw: RawTextPayload = self.payload()?;
                Block::Code(CodeBlock {
                    common,
                    language: raw.language.clone().unwrap_or_default(),
                    caption: runs(raw.caption.clone()),
                    content: text(raw),
                })
            }
            "equation" => {
                let expression = self
                    .payload
                    .get("equation")
                    .and_then(|e| e.get("expression"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Block::Equation(EquationBlock { common, expression })
            }
            "divider" => Block::Divider(MarkerBlock { common }),
            "breadcrumb" => Block::Breadcrumb(MarkerBlock { common }),
            "table_of_contents" => Block::TableOfContents(MarkerBlock { common }),
            "column_list" => Block::ColumnList(MarkerBlock { common }),
            "column" => Block::Column(MarkerBlock { common }),
            "image" => Block::Image(self.media(common)?),
            "video" => Block::Video(self.media(common)?),
            "file" => Block::File(self.media(common)?),
            "pdf" => Block::Pdf(self.media(common)?),
            "bookmark" | "embed" | "link_preview" => {
                let raw: RawUrlPayload = self.payload()?;
                let url_block = UrlBlock {
                    common,
                    url: raw.url,
                    caption: runs(raw.caption),
                };
                match self.block_type.as_str() {
                    "bookmark" => Block::Bookmark(url_block),
                    "embed" => Block::Embed(url_block),
                    _ => Block::LinkPreview(url_block),
                }
            }
            "child_page" | "child_database" => {
                let raw: RawTitle = self.payload()?;
                let child = ChildBlock {
                    common,
                    title: raw.title,
                };
                if self.block_type == "child_page" {
                    Block::ChildPage(child)
                } else {
                    Block::ChildDatabase(child)
                }
            }
            "link_to_page" => {
                let raw: RawLinkToPage = match self.payload.get("link_to_page") {
                    Some(value) => serde_json::from_value(value.clone())?,
                    None => {
                        return Err(AppError::MalformedResponse(format!(
                            "link_to_page block {} has no target",
                            self.id
                        )))
                    }
                };
                let target = match (raw.kind.as_str(), raw.page_id, raw.database_id) {
                    ("page_id", Some(id), _) => LinkTarget::Page(PageId::from_api(id)),
                    (_, _, Some(id)) => LinkTarget::Database(id),
                    (_, Some(id), None) => LinkTarget::Page(PageId::from_api(id)),
                    _ => LinkTarget::Database(String::new()),
                };
                Block::LinkToPage(LinkToPageBlock { common, target })
            }
            "table" => {
                let raw: RawTable = self.payload()?;
                Block::Table(TableBlock {
                    common,
                    table_width: raw.table_width,
                    has_column_header: raw.has_column_header,
                    has_row_header: raw.has_row_header,
                })
            }
            "table_row" => {
                let raw: RawTableRow = self.payload()?;
                Block::TableRow(TableRowBlock {
                    common,
                    cells: raw.cells.into_iter().map(runs).collect(),
                })
            }
            "synced_block" => {
                let raw: RawSynced = self.payload()?;
                Block::Synced(SyncedBlock {
                    common,
                    synced_from: raw.synced_from.map(|s| BlockId::from_api(s.block_id)),
                })
            }
            other => {
                log::debug!("Block {} has unsupported type '{}'", self.id, other);
                Block::Unsupported(UnsupportedBlock {
                    common,
                    block_type: other.to_string(),
                })
            }
        };
        Ok(block)
    }
}

impl RawProperty {
    fn field(&self) -> Option<&Value> {
        self.payload.get(&self.kind)
    }

    fn into_domain(self) -> PropertyValue {
        let option_name = |value: Option<&Value>| {
            value
                .and_then(|v| v.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        match self.kind.as_str() {
            "title" | "rich_text" => {
                let raw: Vec<RawRichText> = self
                    .field()
                    .cloned()
                    .and_then(|v| serde_json::from_value(v).ok())
                    .unwrap_or_default();
                if self.kind == "title" {
                    PropertyValue::Title(runs(raw))
                } else {
                    PropertyValue::RichText(runs(raw))
                }
            }
            "select" => PropertyValue::Select(option_name(self.field())),
            "status" => PropertyValue::Status(option_name(self.field())),
            "multi_select" => PropertyValue::MultiSelect(
                self.field()
                    .and_then(Value::as_array)
                    .map(|options| options.iter().filter_map(|o| option_name(Some(o))).collect())
                    .unwrap_or_default(),
            ),
            "date" => PropertyValue::Date(self.field().and_then(|date| {
                Some(DateValue {
                    start: date.get("start")?.as_str()?.to_string(),
                    end: date.get("end").and_then(Value::as_str).map(str::to_string),
                })
            })),
            "number" => PropertyValue::Number(self.field().and_then(Value::as_f64)),
            "checkbox" => {
                PropertyValue::Checkbox(self.field().and_then(Value::as_bool).unwrap_or(false))
            }
            "url" => {
                PropertyValue::Url(self.field().and_then(Value::as_str).map(str::to_string))
            }
            other => PropertyValue::Other(other.to_string()),
        }
    }
}

impl RawPage {
    /// Convert page metadata; the outline walk fills in order and context.
    pub fn into_domain(self) -> Page {
        let kind = match self.parent {
            Some(RawParent::DatabaseId { .. }) => PageKind::Database,
            _ => PageKind::Outline,
        };
        let mut page = Page::new(PageId::from_api(self.id), kind);
        page.properties = self
            .properties
            .into_iter()
            .map(|(name, raw)| (name, raw.into_domain()))
            .collect();
        page
    }
}
