// src/output/mod.rs
//! Output handling: the docs tree layout, file writing and stale-file
//! pruning.

mod layout;
mod paths;
mod seen;
mod writer;

pub use layout::{HierarchicalLayout, LayoutStrategy};
pub use paths::sanitize_filename;
pub use seen::{SeenFiles, IMAGE_EXTENSIONS, MARKDOWN_EXTENSIONS};
pub use writer::write_page;
