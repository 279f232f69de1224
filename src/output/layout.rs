// src/output/layout.rs
//! Where pages land on disk and which URL paths link to them.

use super::paths::{level_directory_name, page_file_stem};
use crate::error::AppError;
use crate::model::Page;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Maps outline levels and pages onto the docs directory tree.
pub trait LayoutStrategy: Send + Sync {
    /// Directory all pages are written under.
    fn root(&self) -> &Path;

    /// Start a new outline level below `context`, returning the level's
    /// context path.
    fn new_level(&self, context: &str, order: u32, label: &str) -> Result<String, AppError>;

    /// Output file for `page` with `extension` (including the dot).
    fn path_for_page(&self, page: &Page, extension: &str) -> PathBuf;

    /// Site path other pages use to link to `page`.
    fn link_path_for_page(&self, page: &Page) -> String {
        format!("/{}", page.slug()).replace("//", "/")
    }
}

#[derive(Serialize)]
struct CategoryMetadata<'a> {
    position: u32,
    label: &'a str,
}

/// One directory per outline level, each with a `_category_.json` giving
/// the sidebar label and position.
#[derive(Debug, Clone)]
pub struct HierarchicalLayout {
    root: PathBuf,
}

impl HierarchicalLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LayoutStrategy for HierarchicalLayout {
    fn root(&self) -> &Path {
        &self.root
    }

    fn new_level(&self, context: &str, order: u32, label: &str) -> Result<String, AppError> {
        let context = format!(
            "{}/{}",
            context.trim_end_matches('/'),
            level_directory_name(label)
        );
        let directory = self.root.join(context.trim_start_matches('/'));
        std::fs::create_dir_all(&directory)?;

        let metadata = serde_json::to_string(&CategoryMetadata {
            position: order,
            label,
        })?;
        std::fs::write(directory.join("_category_.json"), metadata)?;
        log::debug!("New level {} at position {}", directory.display(), order);
        Ok(context)
    }

    fn path_for_page(&self, page: &Page, extension: &str) -> PathBuf {
        let stem = page_file_stem(page.explicit_slug().as_deref(), &page.name_or_title());
        self.root
            .join(page.layout_context.trim_matches('/'))
            .join(format!("{}{}", stem, extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageKind, PropertyValue};
    use crate::types::{PageId, RichTextItem};

    #[test]
    fn levels_create_directories_with_category_files() {
        let dir = tempfile::tempdir().unwrap();
        let layout = HierarchicalLayout::new(dir.path());
        let context = layout.new_level("", 2, "Getting Started").unwrap();
        assert_eq!(context, "/Getting-Started");
        let nested = layout.new_level(&context, 0, "Basics").unwrap();
        assert_eq!(nested, "/Getting-Started/Basics");

        let category =
            std::fs::read_to_string(dir.path().join("Getting-Started/_category_.json")).unwrap();
        assert_eq!(category, r#"{"position":2,"label":"Getting Started"}"#);
    }

    #[test]
    fn pages_live_in_their_level_directory() {
        let layout = HierarchicalLayout::new("docs");
        let mut page = Page::new(PageId::from_api("123"), PageKind::Outline).with_property(
            "title",
            PropertyValue::Title(vec![RichTextItem::plain_text("Intro")]),
        );
        page.layout_context = "/Getting-Started".to_string();
        assert_eq!(
            layout.path_for_page(&page, ".md"),
            PathBuf::from("docs/Getting-Started/Intro.md")
        );
        assert_eq!(layout.link_path_for_page(&page), "/123");
    }
}
