// src/images/caption.rs
//! Image captions double as a place to list per-locale variants:
//! a caption line like `fr https://example.com/chat.png` names the French
//! image; every other line is ordinary caption text.

use once_cell::sync::Lazy;
use regex::Regex;

static LOCALE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(..)\s*(https://.*)").expect("valid locale caption regex"));

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCaption {
    /// Caption prose, lines joined with single spaces.
    pub text: String,
    /// `(locale, url)` pairs in caption order, locale lowercased.
    pub localized: Vec<(String, String)>,
}

pub fn parse_caption(plain: &str) -> ParsedCaption {
    let mut prose = Vec::new();
    let mut localized = Vec::new();

    for line in plain.split('\n') {
        match LOCALE_LINE.captures(line) {
            Some(caps) => localized.push((caps[1].to_lowercase(), caps[2].trim().to_string())),
            None => prose.push(line),
        }
    }

    ParsedCaption {
        text: prose.join(" ").trim().to_string(),
        localized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn locale_lines_are_split_from_prose() {
        let parsed = parse_caption("A cat\nFR https://example.com/chat.png\non a mat");
        assert_eq!(parsed.text, "A cat on a mat");
        assert_eq!(
            parsed.localized,
            vec![("fr".to_string(), "https://example.com/chat.png".to_string())]
        );
    }

    #[test]
    fn plain_captions_pass_through() {
        let parsed = parse_caption("  Just words ");
        assert_eq!(parsed.text, "Just words");
        assert!(parsed.localized.is_empty());
    }

    #[test]
    fn http_urls_are_not_locale_lines() {
        let parsed = parse_caption("de http://example.com/a.png");
        assert_eq!(parsed.text, "de http://example.com/a.png");
    }
}
