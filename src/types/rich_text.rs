// src/types/rich_text.rs
//! Rich-text runs: the styled spans every text-bearing block is made of.

use super::PageId;
use serde::{Deserialize, Serialize};

/// The kind of rich text content.
///
/// Each variant carries its specific data, so a mention always has mention
/// data and an equation always has an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RichTextType {
    Text { content: String, link: Option<Link> },
    Mention(MentionType),
    Equation { expression: String },
}

/// What a mention run points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MentionType {
    Page { id: PageId },
    Database { id: String },
    User { name: Option<String> },
    Date { start: String, end: Option<String> },
    LinkPreview { url: String },
    Other(String),
}

/// Rich text item with formatting annotations.
///
/// `plain_text` is what the annotator renders for every variant except
/// equations; `href` is the link target Notion resolved for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    pub text_type: RichTextType,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item, the most common rich text variant.
    pub fn plain_text(text: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: None,
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: None,
        }
    }

    /// A text run linking to `href`.
    pub fn linked(text: &str, href: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: Some(Link {
                    url: href.to_string(),
                }),
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: Some(href.to_string()),
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Rewrite the visible text of the run in place.
    ///
    /// Both the `plain_text` fallback and the underlying text content change
    /// so later renderers see the same characters.
    pub fn map_text(&mut self, f: impl Fn(&str) -> String) {
        self.plain_text = f(&self.plain_text);
        if let RichTextType::Text { content, .. } = &mut self.text_type {
            *content = f(content);
        }
    }
}

/// Concatenated plain text of a run sequence.
pub fn plain_text_of(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: "default".to_string(),
        }
    }
}

impl Annotations {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn code() -> Self {
        Self {
            code: true,
            ..Self::default()
        }
    }
}
