// src/model/mod.rs
//! Domain model: blocks as the API delivers them and the pages being published.

mod block;
pub mod blocks;
pub mod common;
mod property_value;

pub use block::Block;
pub use blocks::*;
pub use common::*;
pub use property_value::{DateValue, PropertyValue};

use crate::types::PageId;
use chrono::NaiveDate;
use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent`-style slug encoding leaves alone, plus the
/// path and fragment separators slugs keep.
const SLUG_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'/')
    .remove(b'#');

/// How a page was reached in the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A plain page in the outline tree; its title is the `title` property.
    Outline,
    /// A row of a database, linked from the outline; its title is `Name`.
    Database,
}

/// A page that will become one Markdown document.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    /// Position within its outline level, used as `sidebar_position`.
    pub order: u32,
    /// Directory path of the outline level, relative to the docs root.
    pub layout_context: String,
    pub kind: PageKind,
    pub found_directly_in_outline: bool,
    pub properties: IndexMap<String, PropertyValue>,
}

impl Page {
    pub fn new(id: PageId, kind: PageKind) -> Self {
        Self {
            id,
            order: 0,
            layout_context: String::new(),
            kind,
            found_directly_in_outline: false,
            properties: IndexMap::new(),
        }
    }

    pub fn with_property(mut self, name: &str, value: PropertyValue) -> Self {
        self.properties.insert(name.to_string(), value);
        self
    }

    pub fn plain_text_property(&self, name: &str) -> Option<String> {
        self.properties
            .get(name)
            .and_then(PropertyValue::as_plain_text)
            .filter(|text| !text.is_empty())
    }

    pub fn select_property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(PropertyValue::as_select)
    }

    pub fn date_property(&self, name: &str) -> Option<NaiveDate> {
        match self.properties.get(name) {
            Some(PropertyValue::Date(Some(date))) => date.start_date(),
            _ => None,
        }
    }

    /// `title` property of outline pages.
    pub fn title(&self) -> String {
        self.plain_text_property("title").unwrap_or_default()
    }

    /// `Name` property of database pages.
    pub fn name(&self) -> String {
        self.plain_text_property("Name").unwrap_or_default()
    }

    /// Database pages carry names and outline pages titles; fall back to
    /// whichever one is present.
    pub fn name_or_title(&self) -> String {
        let (preferred, other) = match self.kind {
            PageKind::Outline => (self.title(), self.name()),
            PageKind::Database => (self.name(), self.title()),
        };
        if preferred.is_empty() {
            other
        } else {
            preferred
        }
    }

    /// The `Slug` property, URL-encoded, if the author set one.
    pub fn explicit_slug(&self) -> Option<String> {
        let raw = self.plain_text_property("Slug")?;
        let raw = raw.trim();
        if raw == "/" {
            return Some(raw.to_string());
        }
        let encoded = utf8_percent_encode(raw.trim_start_matches('/'), SLUG_SAFE).to_string();
        Some(format!("/{}", encoded))
    }

    /// Site slug: the explicit one, otherwise `/` followed by the page id.
    pub fn slug(&self) -> String {
        self.explicit_slug()
            .unwrap_or_else(|| format!("/{}", self.id.as_str()))
    }

    pub fn keywords(&self) -> Option<String> {
        self.plain_text_property("Keywords")
    }

    pub fn status(&self) -> Option<&str> {
        self.select_property("Status")
    }

    /// Whether a link id taken from page content refers to this page.
    pub fn matches_link_id(&self, link_id: &str) -> bool {
        self.id.as_str() == link_id || self.id.compact() == link_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RichTextItem;

    fn page() -> Page {
        Page::new(
            PageId::from_api("550e8400-e29b-41d4-a716-446655440000"),
            PageKind::Outline,
        )
    }

    #[test]
    fn slug_defaults_to_the_page_id() {
        assert_eq!(page().slug(), "/550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn explicit_slug_is_encoded_but_keeps_separators() {
        let page = page().with_property(
            "Slug",
            PropertyValue::RichText(vec![RichTextItem::plain_text("/guides/getting started#top")]),
        );
        assert_eq!(page.slug(), "/guides/getting%20started#top");
    }

    #[test]
    fn link_ids_match_either_spelling() {
        let page = page();
        assert!(page.matches_link_id("550e8400e29b41d4a716446655440000"));
        assert!(page.matches_link_id("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!page.matches_link_id("550e8400"));
    }

    #[test]
    fn database_pages_use_their_name() {
        let mut page = page()
            .with_property("Name", PropertyValue::Title(vec![RichTextItem::plain_text("Row")]));
        page.kind = PageKind::Database;
        assert_eq!(page.name_or_title(), "Row");
        page.kind = PageKind::Outline;
        assert_eq!(page.name_or_title(), "Row");
    }

    #[test]
    fn date_properties_parse_to_days() {
        let page = page().with_property(
            "Published",
            PropertyValue::Date(Some(DateValue {
                start: "2024-03-01T10:00:00.000Z".to_string(),
                end: None,
            })),
        );
        assert_eq!(
            page.date_property("Published"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }
}
