// src/lib.rs
//! notion2docs library: converts a Notion page outline into Docusaurus
//! Markdown.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `PipelineConfig`, `ConversionOptions`
//! - **Domain model**: `Page`, `Block` and the block payloads
//! - **API access**: `NotionRepository`, `NotionHttpClient`, `MemoryWorkspace`, parsers
//! - **Conversion**: `PluginRegistry`, `PluginContext`, `page_document`
//! - **Output**: `LayoutStrategy`, `HierarchicalLayout`, `DocsPull`

mod analytics;
#[cfg(feature = "bench")]
pub mod api;
#[cfg(not(feature = "bench"))]
mod api;

mod config;
mod constants;
mod error;
mod error_recovery;

#[cfg(feature = "bench")]
pub mod formatting;
#[cfg(not(feature = "bench"))]
mod formatting;

mod images;
mod links;

#[cfg(feature = "bench")]
pub mod model;
#[cfg(not(feature = "bench"))]
mod model;

mod outline;
mod output;
mod pipeline;
mod plugins;
mod pull;
mod transform;

#[cfg(feature = "bench")]
pub mod types;
#[cfg(not(feature = "bench"))]
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::error_recovery::{retry_with_backoff, RetryPolicy};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{
    CommandLineInput, ConversionOptions, ImageFileNameFormat, ImageOptions, PipelineConfig,
};
pub use crate::constants::{PROBLEM_LINK_MARKER, REACT_PLAYER_IMPORT};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockCommon, DateValue, LinkTarget, Page, PageKind, PropertyValue,
};

// --- Block Types ---
pub use crate::model::blocks::{
    BulletedListItemBlock, CalloutBlock, ChildBlock, CodeBlock, EquationBlock, ExternalFile,
    FileObject, HeadingBlock, Icon, LinkToPageBlock, MarkerBlock, MediaBlock, NotionFile,
    NumberedListItemBlock, ParagraphBlock, QuoteBlock, SyncedBlock, TableBlock, TableRowBlock,
    TextBlockContent, ToDoBlock, ToggleBlock, UnsupportedBlock, UrlBlock,
};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiKey, BlockId, DatabaseId, Link, LocaleCode, MentionType, PageId,
    RichTextItem, RichTextType,
};

// --- API Access ---
pub use crate::api::{
    parser::{
        number_list_items, parse_block_response, parse_blocks_pagination, parse_page_response,
    },
    ApiResponse, AssetFetcher, ColumnFormatSource, HttpAssetFetcher, MemoryWorkspace,
    NotionHttpClient, NotionRepository, RateLimiter, UnofficialColumnSource,
};

// --- Conversion ---
pub use crate::analytics::{RunCounts, RunSummary};
pub use crate::formatting::{rich_text_to_markdown, ConversionEngine, MarkdownTable};
pub use crate::images::{find_last_uuid, hash_of_string, ImageSet};
pub use crate::links::{parse_link_id, LinkId, LinkResolver};
pub use crate::plugins::{
    admonition_kind, BlockConverter, BlockModifier, Converted, LinkModifier, MarkdownReplacer,
    Plugin, PluginContext, PluginRegistry, RegexModification, Replacement, RuleMatch, RunContext,
};
pub use crate::transform::{frontmatter, markdown_for_page, page_document};

// --- Output ---
pub use crate::outline::OutlineWalker;
pub use crate::output::{HierarchicalLayout, LayoutStrategy, SeenFiles};
pub use crate::pull::DocsPull;

// --- Pipeline Traits ---
pub use crate::pipeline::{PageDiscovery, PagePublisher};
