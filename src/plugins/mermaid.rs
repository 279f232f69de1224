// src/plugins/mermaid.rs
//! Mermaid diagrams link nodes to pages with `click` directives; those
//! point at Notion and have to be pointed at the site instead.

use super::{MarkdownReplacer, Plugin, PluginContext, RegexModification, Replacement, RuleMatch};
use crate::error::AppError;
use std::sync::Arc;

pub(super) fn plugin() -> Result<Plugin, AppError> {
    Ok(Plugin::new("mermaid links").with_regex(
        RegexModification::new(
            r#"(?:\n[ \t]*)?click\s+(\S+)\s+"(https://www\.notion\.so/[^"\s]+)""#,
            Replacement::Compute(Arc::new(MermaidClickLinks)),
        )?
        .including_code_blocks(),
    ))
}

struct MermaidClickLinks;

#[async_trait::async_trait]
impl MarkdownReplacer for MermaidClickLinks {
    async fn replace(&self, ctx: &PluginContext<'_>, found: &RuleMatch) -> Result<String, AppError> {
        let target = ctx.link_resolver().convert_internal_url(found.group(2));
        Ok(format!("\n  click {} \"{}\"", found.group(1), target))
    }
}
