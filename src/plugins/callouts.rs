// src/plugins/callouts.rs
//! Callouts become Docusaurus admonitions, the icon choosing the kind.

use super::{BlockConverter, Converted, Plugin, PluginContext};
use crate::error::AppError;
use crate::formatting::rich_text_to_markdown;
use crate::model::Block;
use std::sync::Arc;

pub(super) fn plugin() -> Plugin {
    Plugin::new("standard callout transformer")
        .with_converter(&["callout"], Arc::new(CalloutConverter))
}

/// Admonition kind for a callout icon.
///
/// Unknown emoji are used as the kind verbatim; no emoji means `note`.
pub fn admonition_kind(emoji: Option<&str>) -> String {
    let Some(emoji) = emoji else {
        return "note".to_string();
    };
    match emoji.trim_end_matches('\u{fe0f}') {
        "\u{2139}" => "note",
        "💡" => "tip",
        "❗" => "info",
        "\u{26a0}" => "caution",
        "🔥" => "danger",
        _ => emoji,
    }
    .to_string()
}

struct CalloutConverter;

#[async_trait::async_trait]
impl BlockConverter for CalloutConverter {
    async fn convert(
        &self,
        ctx: &mut PluginContext<'_>,
        block: &Block,
    ) -> Result<Converted, AppError> {
        let Block::Callout(callout) = block else {
            return Ok(Converted::UseDefault);
        };

        let mut body = rich_text_to_markdown(&callout.content.rich_text);
        if block.has_children() {
            let children = ctx.children(block.id()).await?;
            for child in &children {
                let markdown = ctx.block_to_markdown(child).await?;
                body.push('\n');
                body.push_str(markdown.trim_end());
            }
        }

        let kind = admonition_kind(callout.icon.as_ref().and_then(|i| i.emoji()));
        Ok(Converted::Rendered(format!(
            ":::{}\n\n{}\n\n:::\n\n",
            kind, body
        )))
    }
}
