// src/formatting/mod.rs
//! Renders Notion blocks into Markdown.

mod default_renderer;
mod engine;
pub mod rich_text;
pub mod table;

pub use engine::ConversionEngine;
pub use rich_text::rich_text_to_markdown;
pub use table::MarkdownTable;
