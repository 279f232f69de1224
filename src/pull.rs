// src/pull.rs
//! One complete docs run: discover, convert and write every page, then
//! prune files the run did not produce.

use crate::analytics::{RunCounts, RunSummary};
use crate::api::{AssetFetcher, ColumnFormatSource, NotionRepository};
use crate::config::ConversionOptions;
use crate::error::AppError;
use crate::images::localized_docs_root;
use crate::model::{Page, PageKind};
use crate::outline::OutlineWalker;
use crate::output::{
    write_page, LayoutStrategy, SeenFiles, IMAGE_EXTENSIONS, MARKDOWN_EXTENSIONS,
};
use crate::pipeline::{PageDiscovery, PagePublisher};
use crate::plugins::{PluginContext, PluginRegistry, RunContext};
use crate::transform::page_document;
use crate::types::PageId;

pub struct DocsPull<'a> {
    options: &'a ConversionOptions,
    plugins: &'a PluginRegistry,
    layout: &'a dyn LayoutStrategy,
    repository: &'a dyn NotionRepository,
    assets: &'a dyn AssetFetcher,
    column_formats: &'a dyn ColumnFormatSource,
    counts: RunCounts,
    seen: SeenFiles,
}

impl<'a> DocsPull<'a> {
    pub fn new(
        options: &'a ConversionOptions,
        plugins: &'a PluginRegistry,
        layout: &'a dyn LayoutStrategy,
        repository: &'a dyn NotionRepository,
        assets: &'a dyn AssetFetcher,
        column_formats: &'a dyn ColumnFormatSource,
    ) -> Self {
        Self {
            options,
            plugins,
            layout,
            repository,
            assets,
            column_formats,
            counts: RunCounts::default(),
            seen: SeenFiles::default(),
        }
    }

    /// Discover and publish everything below `root`.
    pub async fn run(&self, root: &PageId) -> Result<RunSummary, AppError> {
        let pages = self.discover(root).await?;
        self.publish(&pages).await
    }

    fn skip_for_status(&self, page: &Page) -> bool {
        page.kind == PageKind::Database && !self.options.publishes_status(page.status())
    }

    async fn output_page(&self, run: RunContext<'_>, page: &Page) -> Result<(), AppError> {
        log::info!("Reading page \"{}\" ({})", page.name_or_title(), page.id);
        let blocks = self.repository.retrieve_children(&page.id.retag()).await?;

        let mut ctx = PluginContext::for_page(run, page);
        let document = page_document(&mut ctx, blocks).await?;

        let path = self.layout.path_for_page(page, ".md");
        write_page(&path, &document, &self.seen).await?;
        RunCounts::increment(&self.counts.output_normally);
        Ok(())
    }

    fn prune_stale_files(&self) -> Result<usize, AppError> {
        let mut removed = self
            .seen
            .prune(self.layout.root(), MARKDOWN_EXTENSIONS)?;
        removed += self.seen.prune(self.layout.root(), IMAGE_EXTENSIONS)?;
        if let Some(images) = &self.options.images.output_path {
            removed += self.seen.prune(images, IMAGE_EXTENSIONS)?;
        }
        for locale in &self.options.locales {
            let root = localized_docs_root(&self.options.site_root, locale.as_str());
            removed += self.seen.prune(&root, IMAGE_EXTENSIONS)?;
        }
        Ok(removed)
    }
}

#[async_trait::async_trait]
impl PageDiscovery for DocsPull<'_> {
    async fn discover(&self, root: &PageId) -> Result<Vec<Page>, AppError> {
        OutlineWalker::new(self.repository, self.layout, &self.counts)
            .discover(root)
            .await
    }
}

#[async_trait::async_trait]
impl PagePublisher for DocsPull<'_> {
    async fn publish(&self, pages: &[Page]) -> Result<RunSummary, AppError> {
        let run = RunContext {
            options: self.options,
            plugins: self.plugins,
            pages,
            layout: self.layout,
            repository: self.repository,
            assets: self.assets,
            column_formats: self.column_formats,
            seen: &self.seen,
            counts: &self.counts,
        };

        for page in pages {
            if self.skip_for_status(page) {
                log::info!(
                    "Skipping \"{}\": status {:?} is not {}",
                    page.name_or_title(),
                    page.status(),
                    self.options.status_tag
                );
                RunCounts::increment(&self.counts.skipped_because_status);
                continue;
            }
            self.output_page(run, page).await?;
        }

        let removed = self.prune_stale_files()?;
        let summary = self.counts.summary();
        log::info!("Removed {} stale files", removed);
        log::info!("{}", summary);
        Ok(summary)
    }
}
