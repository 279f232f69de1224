// src/links/mod.rs
//! Resolving links between Notion pages to links between site pages.

use crate::constants::{LINK_TO_PAGE_LABEL, PROBLEM_LINK_MARKER};
use crate::model::Page;
use crate::output::LayoutStrategy;
use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\]]*)\]\(([^)]*)\)$").expect("valid markdown link regex"));

static HYPHENATED_UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("valid uuid regex")
});

/// A link target split into the page id it names and its `#fragment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkId {
    pub base: String,
    /// Includes the leading `#`; empty when there is none.
    pub fragment: String,
}

/// Extract the page id from a Notion URL, `/id` reference or bare id.
///
/// Notion URLs end in `title-words-<id>`, so the id is what follows the last
/// `-` of the last path segment, unless that segment is a hyphenated UUID.
pub fn parse_link_id(target: &str) -> LinkId {
    let (base, fragment) = match target.split_once('#') {
        Some((base, fragment)) => (base, format!("#{}", fragment)),
        None => (target, String::new()),
    };
    let base = base.split('?').next().unwrap_or(base);
    let segment = base.rsplit('/').next().unwrap_or(base);
    let id = if HYPHENATED_UUID.is_match(segment) {
        segment
    } else {
        segment.rsplit('-').next().unwrap_or(segment)
    };
    LinkId {
        base: id.to_string(),
        fragment,
    }
}

pub struct LinkResolver<'a> {
    pages: &'a [Page],
    layout: &'a dyn LayoutStrategy,
}

impl<'a> LinkResolver<'a> {
    pub fn new(pages: &'a [Page], layout: &'a dyn LayoutStrategy) -> Self {
        Self { pages, layout }
    }

    pub fn find_page(&self, link_id: &str) -> Option<&'a Page> {
        self.pages.iter().find(|p| p.matches_link_id(link_id))
    }

    /// Rewrite a whole `[label](target)` link to point at the site page.
    ///
    /// Unknown targets become a visible problem marker so authors notice.
    pub fn convert_internal_link(&self, markdown_link: &str, source: &Page) -> String {
        let Some(caps) = MARKDOWN_LINK.captures(markdown_link) else {
            log::warn!(
                "Could not parse link {} on page {}",
                markdown_link,
                source.slug()
            );
            return markdown_link.to_string();
        };
        let label = &caps[1];
        let link_id = parse_link_id(&caps[2]);

        match self.find_page(&link_id.base) {
            Some(target) => {
                let label = if label == LINK_TO_PAGE_LABEL {
                    target.name_or_title()
                } else {
                    label.to_string()
                };
                format!(
                    "[{}]({}{})",
                    label,
                    self.layout.link_path_for_page(target),
                    link_id.fragment
                )
            }
            None => {
                log::warn!(
                    "Could not find the target of link {} on page {} ({}). \
                     Links to outline sections are not supported.",
                    markdown_link,
                    source.slug(),
                    source.id
                );
                PROBLEM_LINK_MARKER.to_string()
            }
        }
    }

    /// Rewrite a bare Notion URL; unknown targets are returned unchanged.
    pub fn convert_internal_url(&self, url: &str) -> String {
        let link_id = parse_link_id(url);
        match self.find_page(&link_id.base) {
            Some(target) => format!(
                "{}{}",
                self.layout.link_path_for_page(target),
                link_id.fragment
            ),
            None => {
                log::warn!("Could not find the target of url {}", url);
                url.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageKind, PropertyValue};
    use crate::output::HierarchicalLayout;
    use crate::types::{PageId, RichTextItem};
    use pretty_assertions::assert_eq;

    fn pages() -> Vec<Page> {
        vec![
            Page::new(PageId::from_api("123"), PageKind::Outline)
                .with_property(
                    "Slug",
                    PropertyValue::RichText(vec![RichTextItem::plain_text("hello-world")]),
                )
                .with_property(
                    "title",
                    PropertyValue::Title(vec![RichTextItem::plain_text("Hello World")]),
                ),
            Page::new(
                PageId::from_api("550e8400-e29b-41d4-a716-446655440000"),
                PageKind::Outline,
            ),
        ]
    }

    #[test]
    fn link_ids_come_from_the_last_segment() {
        assert_eq!(
            parse_link_id("https://www.notion.so/Some-Title-550e8400e29b41d4a716446655440000?pvs=4#abc"),
            LinkId {
                base: "550e8400e29b41d4a716446655440000".to_string(),
                fragment: "#abc".to_string(),
            }
        );
        assert_eq!(
            parse_link_id("/550e8400-e29b-41d4-a716-446655440000").base,
            "550e8400-e29b-41d4-a716-446655440000"
        );
        assert_eq!(parse_link_id("/123#456").fragment, "#456");
    }

    #[test]
    fn known_links_point_at_slugs_and_keep_fragments() {
        let pages = pages();
        let layout = HierarchicalLayout::new("docs");
        let resolver = LinkResolver::new(&pages, &layout);
        assert_eq!(
            resolver.convert_internal_link("[see](/123#456)", &pages[1]),
            "[see](/hello-world#456)"
        );
        assert_eq!(
            resolver.convert_internal_link("[link_to_page](https://www.notion.so/123)", &pages[1]),
            "[Hello World](/hello-world)"
        );
    }

    #[test]
    fn unknown_links_are_marked() {
        let pages = pages();
        let layout = HierarchicalLayout::new("docs");
        let resolver = LinkResolver::new(&pages, &layout);
        assert_eq!(
            resolver.convert_internal_link("[x](/999)", &pages[0]),
            PROBLEM_LINK_MARKER
        );
        assert_eq!(
            resolver.convert_internal_url("https://www.notion.so/nothing-999"),
            "https://www.notion.so/nothing-999"
        );
    }

    #[test]
    fn compact_ids_match_hyphenated_pages() {
        let pages = pages();
        let layout = HierarchicalLayout::new("docs");
        let resolver = LinkResolver::new(&pages, &layout);
        assert_eq!(
            resolver.convert_internal_url("https://www.notion.so/550e8400e29b41d4a716446655440000"),
            "/550e8400-e29b-41d4-a716-446655440000"
        );
    }
}
