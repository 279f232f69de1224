// src/outline.rs
//! Discovering the pages to publish by walking the outline page tree.
//!
//! Child pages of the outline either hold content (they become documents)
//! or hold further child pages (they become sidebar levels). `link_to_page`
//! blocks on a level pull database pages into that level.

use crate::analytics::RunCounts;
use crate::api::NotionRepository;
use crate::constants::{OUTLINE_MAX_DEPTH, OUTLINE_PAGE_TITLE};
use crate::error::AppError;
use crate::model::{Block, LinkTarget, Page};
use crate::output::LayoutStrategy;
use crate::types::PageId;
use futures::future::BoxFuture;

/// What a page's blocks say about its place in the outline.
#[derive(Debug, Default, PartialEq)]
struct ContentInfo {
    has_content: bool,
    child_pages: Vec<(PageId, u32)>,
    linked_pages: Vec<(PageId, u32)>,
}

impl ContentInfo {
    fn from_blocks(blocks: &[Block]) -> Self {
        let mut info = Self::default();
        for (index, block) in blocks.iter().enumerate() {
            let order = index as u32;
            match block {
                Block::ChildPage(child) => info.child_pages.push((child.common.id.retag(), order)),
                Block::LinkToPage(link) => {
                    if let LinkTarget::Page(id) = &link.target {
                        info.linked_pages.push((id.clone(), order));
                    }
                }
                Block::ChildDatabase(_) => {}
                _ => info.has_content = true,
            }
        }
        info
    }
}

struct WalkStep {
    context: String,
    page_id: PageId,
    order: u32,
    depth: usize,
    visited: im::HashSet<PageId>,
}

pub struct OutlineWalker<'a> {
    repository: &'a dyn NotionRepository,
    layout: &'a dyn LayoutStrategy,
    counts: &'a RunCounts,
}

impl<'a> OutlineWalker<'a> {
    pub fn new(
        repository: &'a dyn NotionRepository,
        layout: &'a dyn LayoutStrategy,
        counts: &'a RunCounts,
    ) -> Self {
        Self {
            repository,
            layout,
            counts,
        }
    }

    /// Every publishable page below `root`, in outline order.
    pub async fn discover(&self, root: &PageId) -> Result<Vec<Page>, AppError> {
        let mut pages = Vec::new();
        let step = WalkStep {
            context: String::new(),
            page_id: root.clone(),
            order: 0,
            depth: 0,
            visited: im::HashSet::new(),
        };
        self.walk(step, &mut pages).await?;
        log::info!("Found {} pages in the outline", pages.len());
        Ok(pages)
    }

    fn walk<'c>(
        &'c self,
        step: WalkStep,
        pages: &'c mut Vec<Page>,
    ) -> BoxFuture<'c, Result<(), AppError>> {
        Box::pin(async move {
            let is_root = step.depth == 0;
            if step.depth > OUTLINE_MAX_DEPTH {
                log::warn!(
                    "Outline is nested deeper than {} levels at page {}; not descending further",
                    OUTLINE_MAX_DEPTH,
                    step.page_id
                );
                return Ok(());
            }
            if step.visited.contains(&step.page_id) {
                log::warn!("Page {} appears inside itself; skipping the cycle", step.page_id);
                return Ok(());
            }
            let visited = step.visited.update(step.page_id.clone());

            let mut page = self.repository.retrieve_page(&step.page_id).await?;
            page.order = step.order;
            page.layout_context = step.context.clone();
            page.found_directly_in_outline = true;

            let blocks = self.repository.retrieve_children(&step.page_id.retag()).await?;
            let info = ContentInfo::from_blocks(&blocks);

            if !is_root && info.has_content && !info.child_pages.is_empty() {
                log::error!(
                    "Skipping \"{}\" ({}): a page with child pages becomes a sidebar level and \
                     cannot have content of its own",
                    page.name_or_title(),
                    page.id
                );
                RunCounts::increment(&self.counts.skipped_because_level_cannot_have_content);
                return Ok(());
            }

            if !is_root && info.has_content {
                log::debug!("Page \"{}\" has content", page.name_or_title());
                pages.push(page);
                return Ok(());
            }

            if !is_root && info.child_pages.is_empty() && info.linked_pages.is_empty() {
                log::warn!(
                    "Skipping \"{}\" ({}): it has no content and no child pages",
                    page.name_or_title(),
                    page.id
                );
                RunCounts::increment(&self.counts.skipped_because_empty);
                return Ok(());
            }

            let title = page.name_or_title();
            let context = if is_root || title == OUTLINE_PAGE_TITLE {
                step.context.clone()
            } else {
                self.layout.new_level(&step.context, step.order, &title)?
            };

            for (child_id, order) in info.child_pages {
                let child = WalkStep {
                    context: context.clone(),
                    page_id: child_id,
                    order,
                    depth: step.depth + 1,
                    visited: visited.clone(),
                };
                self.walk(child, pages).await?;
            }

            for (linked_id, order) in info.linked_pages {
                let mut linked = self.repository.retrieve_page(&linked_id).await?;
                linked.order = order;
                linked.layout_context = context.clone();
                linked.found_directly_in_outline = false;
                pages.push(linked);
            }
            Ok(())
        })
    }
}
