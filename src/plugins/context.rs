// src/plugins/context.rs
//! Per-page conversion context handed to every plugin hook.

use super::PluginRegistry;
use crate::analytics::RunCounts;
use crate::api::{AssetFetcher, ColumnFormatSource, NotionRepository};
use crate::config::ConversionOptions;
use crate::error::AppError;
use crate::formatting::ConversionEngine;
use crate::links::LinkResolver;
use crate::model::{Block, Page};
use crate::output::{LayoutStrategy, SeenFiles};
use crate::types::BlockId;
use std::path::PathBuf;

/// Everything shared by all pages of one run.
#[derive(Clone, Copy)]
pub struct RunContext<'a> {
    pub options: &'a ConversionOptions,
    pub plugins: &'a PluginRegistry,
    pub pages: &'a [Page],
    pub layout: &'a dyn LayoutStrategy,
    pub repository: &'a dyn NotionRepository,
    pub assets: &'a dyn AssetFetcher,
    pub column_formats: &'a dyn ColumnFormatSource,
    pub seen: &'a SeenFiles,
    pub counts: &'a RunCounts,
}

/// The page being converted plus the run it belongs to.
///
/// `imports` collects JSX import lines requested by hooks while the page is
/// converted; they are emitted once at the top of the document.
pub struct PluginContext<'a> {
    pub options: &'a ConversionOptions,
    pub pages: &'a [Page],
    pub page: &'a Page,
    pub layout: &'a dyn LayoutStrategy,
    pub repository: &'a dyn NotionRepository,
    pub assets: &'a dyn AssetFetcher,
    pub column_formats: &'a dyn ColumnFormatSource,
    pub seen: &'a SeenFiles,
    pub counts: &'a RunCounts,
    /// Directory the page's Markdown file is written to.
    pub directory_containing_markdown: PathBuf,
    /// That directory relative to the Markdown root.
    pub relative_directory_of_page: PathBuf,
    pub imports: Vec<String>,
    engine: ConversionEngine<'a>,
}

impl<'a> PluginContext<'a> {
    pub fn for_page(run: RunContext<'a>, page: &'a Page) -> Self {
        let file = run.layout.path_for_page(page, ".md");
        let directory_containing_markdown = file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| run.layout.root().to_path_buf());
        let relative_directory_of_page =
            pathdiff::diff_paths(&directory_containing_markdown, run.layout.root())
                .unwrap_or_default();

        Self {
            options: run.options,
            pages: run.pages,
            page,
            layout: run.layout,
            repository: run.repository,
            assets: run.assets,
            column_formats: run.column_formats,
            seen: run.seen,
            counts: run.counts,
            directory_containing_markdown,
            relative_directory_of_page,
            imports: Vec::new(),
            engine: ConversionEngine::new(run.plugins),
        }
    }

    pub fn plugins(&self) -> &'a PluginRegistry {
        self.engine.plugins()
    }

    /// Children of `id` with every block modifier already applied.
    pub async fn children(&self, id: &BlockId) -> Result<Vec<Block>, AppError> {
        let mut blocks = self.repository.retrieve_children(id).await?;
        for block in &mut blocks {
            self.engine.plugins().modify_block(block);
        }
        Ok(blocks)
    }

    /// Convert a block the way the engine would, custom converters included.
    pub async fn block_to_markdown(&mut self, block: &Block) -> Result<String, AppError> {
        let engine = self.engine;
        engine.render_block(self, block).await
    }

    /// Convert a block ignoring custom converters for its own type.
    pub async fn default_markdown(&mut self, block: &Block) -> Result<String, AppError> {
        let engine = self.engine;
        engine.render_default(self, block).await
    }

    pub async fn blocks_to_markdown(&mut self, blocks: &[Block]) -> Result<String, AppError> {
        let engine = self.engine;
        engine.render_blocks(self, blocks).await
    }

    pub fn link_resolver(&self) -> LinkResolver<'a> {
        LinkResolver::new(self.pages, self.layout)
    }

    /// Request an import line at the top of the page; duplicates collapse.
    pub fn add_import(&mut self, import: &str) {
        if !self.imports.iter().any(|i| i == import) {
            self.imports.push(import.to_string());
        }
    }
}
