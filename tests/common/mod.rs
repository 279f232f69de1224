// tests/common/mod.rs
//! Shared fixture: an in-memory workspace, a temporary docs root and the
//! standard plugins, ready to convert one page.

#![allow(dead_code)]

use notion2docs::{
    markdown_for_page, AppError, Block, BlockCommon, BlockId, ConversionOptions,
    HierarchicalLayout, MemoryWorkspace, Page, PageId, PageKind, PluginContext, PluginRegistry,
    PropertyValue, RichTextItem, RunContext, RunCounts, SeenFiles,
};
use std::path::PathBuf;

pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\nrest-of-the-image";

pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub options: ConversionOptions,
    pub plugins: PluginRegistry,
    pub layout: HierarchicalLayout,
    pub workspace: MemoryWorkspace,
    pub pages: Vec<Page>,
    pub seen: SeenFiles,
    pub counts: RunCounts,
}

pub const HELLO_ID: &str = "0f1e2d3c4b5a69788796a5b4c3d2e1f0";

/// Outline page [`HELLO_ID`] titled "Hello World" with slug `hello-world`.
pub fn hello_world() -> Page {
    Page::new(PageId::from_api(HELLO_ID), PageKind::Outline)
        .with_property(
            "title",
            PropertyValue::Title(vec![RichTextItem::plain_text("Hello World")]),
        )
        .with_property(
            "Slug",
            PropertyValue::RichText(vec![RichTextItem::plain_text("hello-world")]),
        )
}

pub fn titled(id: &str, kind: PageKind, title: &str) -> Page {
    let property = match kind {
        PageKind::Outline => "title",
        PageKind::Database => "Name",
    };
    Page::new(PageId::from_api(id), kind).with_property(
        property,
        PropertyValue::Title(vec![RichTextItem::plain_text(title)]),
    )
}

pub fn common(id: &str) -> BlockCommon {
    BlockCommon::new(BlockId::from_api(id))
}

pub fn text(s: &str) -> Block {
    Block::paragraph(vec![RichTextItem::plain_text(s)])
}

impl Fixture {
    pub fn new(workspace: MemoryWorkspace) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        let mut options = ConversionOptions::new(&docs);
        options.site_root = dir.path().to_path_buf();
        Self {
            layout: HierarchicalLayout::new(&docs),
            dir,
            options,
            plugins: PluginRegistry::standard().unwrap(),
            workspace,
            pages: vec![hello_world()],
            seen: SeenFiles::default(),
            counts: RunCounts::default(),
        }
    }

    pub fn docs(&self) -> PathBuf {
        self.dir.path().join("docs")
    }

    pub fn run(&self) -> RunContext<'_> {
        RunContext {
            options: &self.options,
            plugins: &self.plugins,
            pages: &self.pages,
            layout: &self.layout,
            repository: &self.workspace,
            assets: &self.workspace,
            column_formats: &self.workspace,
            seen: &self.seen,
            counts: &self.counts,
        }
    }

    /// Markdown body of the first page built from `blocks`.
    pub async fn try_body(&self, blocks: Vec<Block>) -> Result<String, AppError> {
        let mut ctx = PluginContext::for_page(self.run(), &self.pages[0]);
        markdown_for_page(&mut ctx, blocks).await
    }

    pub async fn body(&self, blocks: Vec<Block>) -> String {
        self.try_body(blocks).await.unwrap()
    }
}
