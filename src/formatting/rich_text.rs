// src/formatting/rich_text.rs
//! Rich-text runs to inline Markdown.
//!
//! Styles nest in a fixed order: code innermost, then strikethrough,
//! italic and bold, with underline as HTML outside everything. Whitespace
//! at either end of a styled run stays outside the markers, since
//! `** bold**` is not emphasis in Markdown.

use crate::types::{Annotations, RichTextItem, RichTextType};

/// Renderer for annotation styles to Markdown.
pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    /// Wraps already-trimmed content in the markers `annotations` call for.
    pub fn apply_styles(content: &str, annotations: &Annotations) -> String {
        let mut result = content.to_string();

        if annotations.code {
            result = format!("`{}`", result);
        }
        if annotations.strikethrough {
            result = format!("~~{}~~", result);
        }
        if annotations.italic {
            result = format!("_{}_", result);
        }
        if annotations.bold {
            result = format!("**{}**", result);
        }
        // Underline requires HTML
        if annotations.underline {
            result = format!("<u>{}</u>", result);
        }

        result
    }
}

/// Style one piece of text, keeping surrounding whitespace unstyled.
pub fn annotate_plain_text(text: &str, annotations: &Annotations) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return text.to_string();
    }
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];
    format!(
        "{}{}{}",
        leading,
        MarkdownStyleRenderer::apply_styles(trimmed, annotations),
        trailing
    )
}

fn render_item(item: &RichTextItem) -> String {
    let text = match &item.text_type {
        RichTextType::Equation { expression } => format!("${}$", expression),
        _ => annotate_plain_text(&item.plain_text, &item.annotations),
    };
    match &item.href {
        Some(href) if !text.is_empty() => format!("[{}]({})", text, href),
        _ => text,
    }
}

/// Formats a sequence of rich-text runs into one inline Markdown string.
pub fn rich_text_to_markdown(items: &[RichTextItem]) -> String {
    items.iter().map(render_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn styled(text: &str, f: impl FnOnce(&mut Annotations)) -> RichTextItem {
        let mut annotations = Annotations::default();
        f(&mut annotations);
        RichTextItem::plain_text(text).with_annotations(annotations)
    }

    #[test]
    fn bold_runs_are_starred() {
        let items = [styled("strong", |a| a.bold = true)];
        assert_eq!(rich_text_to_markdown(&items), "**strong**");
    }

    #[test]
    fn nesting_order_is_fixed() {
        let items = [styled("all", |a| {
            a.bold = true;
            a.italic = true;
            a.strikethrough = true;
            a.code = true;
        })];
        assert_eq!(rich_text_to_markdown(&items), "**_~~`all`~~_**");
    }

    #[test]
    fn underline_wraps_outside_bold() {
        let items = [styled("u", |a| {
            a.bold = true;
            a.underline = true;
        })];
        assert_eq!(rich_text_to_markdown(&items), "<u>**u**</u>");
    }

    #[test]
    fn whitespace_stays_outside_markers() {
        let items = [
            RichTextItem::plain_text("a"),
            styled(" bold ", |a| a.bold = true),
            RichTextItem::plain_text("b"),
        ];
        assert_eq!(rich_text_to_markdown(&items), "a **bold** b");
    }

    #[test]
    fn whitespace_only_runs_are_left_alone() {
        let items = [styled("   ", |a| a.italic = true)];
        assert_eq!(rich_text_to_markdown(&items), "   ");
    }

    #[test]
    fn links_wrap_the_styled_text() {
        let items = [RichTextItem::linked("docs", "/123").with_annotations(Annotations::bold())];
        assert_eq!(rich_text_to_markdown(&items), "[**docs**](/123)");
    }

    #[test]
    fn equations_are_inline_math() {
        let item = RichTextItem {
            text_type: RichTextType::Equation {
                expression: "e^{i\\pi}".to_string(),
            },
            annotations: Annotations::default(),
            plain_text: "e^{i\\pi}".to_string(),
            href: None,
        };
        assert_eq!(rich_text_to_markdown(&[item]), "$e^{i\\pi}$");
    }

    #[test]
    fn empty_runs_contribute_nothing() {
        assert_eq!(rich_text_to_markdown(&[]), "");
        assert_eq!(rich_text_to_markdown(&[RichTextItem::plain_text("")]), "");
    }
}
