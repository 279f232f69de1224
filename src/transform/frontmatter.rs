// src/transform/frontmatter.rs
use crate::model::Page;
use std::fmt::Write;

/// Docusaurus front matter for `page`.
///
/// Colons would end the YAML value early, so titles use `-` instead.
pub fn frontmatter(page: &Page) -> Result<String, std::fmt::Error> {
    let mut out = String::from("---\n");
    writeln!(out, "title: {}", page.name_or_title().replace(':', "-"))?;
    writeln!(out, "sidebar_position: {}", page.order)?;
    writeln!(out, "slug: {}", page.slug())?;
    if let Some(keywords) = page.keywords() {
        writeln!(out, "keywords: [{}]", keywords)?;
    }
    out.push_str("---\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageKind, PropertyValue};
    use crate::types::{PageId, RichTextItem};

    #[test]
    fn frontmatter_lists_title_position_slug_and_keywords() {
        let mut page = Page::new(PageId::from_api("abc"), PageKind::Outline)
            .with_property(
                "title",
                PropertyValue::Title(vec![RichTextItem::plain_text("Setup: Part 1")]),
            )
            .with_property(
                "Keywords",
                PropertyValue::RichText(vec![RichTextItem::plain_text("install, setup")]),
            );
        page.order = 3;
        insta::assert_snapshot!(frontmatter(&page).unwrap(), @r"
        ---
        title: Setup- Part 1
        sidebar_position: 3
        slug: /abc
        keywords: [install, setup]
        ---
        ");
    }
}
