// src/plugins/links.rs
//! Link modifiers for links between Notion pages and links leaving Notion.

use super::{LinkModifier, Plugin, PluginContext};
use crate::error::AppError;
use once_cell::sync::Lazy;
use regex::Regex;

static BOOKMARK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[bookmark\]\((.*)\)$").expect("valid bookmark regex"));

pub(super) fn internal_links_plugin() -> Result<Plugin, AppError> {
    Ok(Plugin::new("internal links").with_link_modifier(LinkModifier {
        // Notion URLs, `/id` references (optionally with a fragment) and bare
        // 32 or 36 character ids. Other site-relative links are left alone.
        matcher: Regex::new(
            r"^\[[^\]]*\]\((?:https://www\.notion\.so/[^)]*|/(?:[0-9a-fA-F]{32}|[0-9a-fA-F-]{36})(?:#[^)]*)?|[0-9a-fA-F]{32}|[0-9a-fA-F-]{36})\)$",
        )?,
        convert: convert_internal,
    }))
}

fn convert_internal(ctx: &PluginContext<'_>, markdown_link: &str) -> String {
    ctx.link_resolver()
        .convert_internal_link(markdown_link, ctx.page)
}

pub(super) fn external_links_plugin() -> Result<Plugin, AppError> {
    Ok(Plugin::new("external links").with_link_modifier(LinkModifier {
        matcher: Regex::new(r"^\[[^\]]*\]\(https?://[^)]*\)$")?,
        convert: convert_external,
    }))
}

/// Bookmarks read better labelled with their url; other links pass through.
fn convert_external(_ctx: &PluginContext<'_>, markdown_link: &str) -> String {
    match BOOKMARK.captures(markdown_link) {
        Some(caps) => format!("[{}]({})", &caps[1], &caps[1]),
        None => markdown_link.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_matcher_never_claims_mail_or_relative_links() {
        let plugin = internal_links_plugin().unwrap();
        let matcher = &plugin.link_modifier.as_ref().unwrap().matcher;
        assert!(matcher.is_match("[a](https://www.notion.so/Page-123)"));
        assert!(matcher.is_match("[a](/550e8400e29b41d4a716446655440000)"));
        assert!(matcher.is_match("[a](/550e8400-e29b-41d4-a716-446655440000#usage)"));
        assert!(matcher.is_match("[a](550e8400e29b41d4a716446655440000)"));
        assert!(!matcher.is_match("[a](mailto:someone@example.com)"));
        assert!(!matcher.is_match("[a](./picture.png)"));
        assert!(!matcher.is_match("[a](https://example.com)"));
        assert!(!matcher.is_match("[Intro](/docs/intro)"));
        assert!(!matcher.is_match("[a](/123)"));
    }

    #[test]
    fn bookmark_labels_become_urls() {
        let caps = BOOKMARK.captures("[bookmark](https://example.com)").unwrap();
        assert_eq!(&caps[1], "https://example.com");
    }
}
