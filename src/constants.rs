// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while listing block children.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Requests per second the shared rate limiter allows by default.
///
/// Notion's published average limit is three requests per second.
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 3;

/// Attempts per API call before a transient failure becomes terminal.
pub const API_MAX_ATTEMPTS: u32 = 4;

/// First backoff delay between attempts, doubled after every failure.
pub const API_INITIAL_BACKOFF_MS: u64 = 500;

/// Upper bound on a single backoff delay.
pub const API_MAX_BACKOFF_MS: u64 = 8_000;

/// Maximum nesting depth when walking the page outline.
pub const OUTLINE_MAX_DEPTH: usize = 50;

// ---------------------------------------------------------------------------
// Output vocabulary
// ---------------------------------------------------------------------------

/// Replaces a link whose target page is not part of this run.
pub const PROBLEM_LINK_MARKER: &str = "**[Problem Internal Link]**";

/// Label Notion-to-Markdown rendering gives `link_to_page` blocks; the link
/// resolver swaps it for the target page's title.
pub const LINK_TO_PAGE_LABEL: &str = "link_to_page";

/// MDX import needed by every video embed.
pub const REACT_PLAYER_IMPORT: &str = r#"import ReactPlayer from "react-player";"#;

/// Horizontal gap Docusaurus' notion-column CSS leaves between columns.
pub const COLUMN_SPACER_WIDTH: &str = "min(32px, 4vw)";

/// Hex characters kept from the SHA-256 digest for content-hash image names.
pub const CONTENT_HASH_LENGTH: usize = 20;

/// Markdown image path prefix used when none is configured.
pub const DEFAULT_IMAGE_PREFIX: &str = ".";

/// Status a database page needs to be published, unless overridden.
pub const DEFAULT_STATUS_TAG: &str = "Publish";

/// Outline page whose children sit at the docs root instead of a level.
pub const OUTLINE_PAGE_TITLE: &str = "Outline";

/// Base URL Notion uses for page links.
pub const NOTION_PAGE_URL_PREFIX: &str = "https://www.notion.so/";

/// Minimum dash count in a Markdown table delimiter cell.
pub const TABLE_MIN_COLUMN_WIDTH: usize = 3;

// ---------------------------------------------------------------------------
// String capacity hints (performance, not correctness)
// ---------------------------------------------------------------------------

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
