// src/output/paths.rs
//! Pure functions for file and directory names.

/// Sanitizes a string to be safe for use as a filename.
///
/// Quotes are dropped and `?` becomes `-` so titles like `What's new?`
/// keep a readable name.
pub fn sanitize_filename(name: &str) -> String {
    let mut safe_name = name
        .chars()
        .filter(|c| !matches!(c, '"' | '\u{201c}' | '\u{201d}' | '\''))
        .map(|c| match c {
            '?' => '-',
            '/' | '\\' | ':' | '*' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>();

    // Trim whitespace and dots
    safe_name = safe_name.trim().trim_matches('.').to_string();

    if safe_name.chars().count() > 100 {
        safe_name = safe_name.chars().take(100).collect();
    }

    if safe_name.is_empty() {
        safe_name = "unnamed".to_string();
    }

    safe_name
}

/// Directory name for an outline level.
pub fn level_directory_name(label: &str) -> String {
    sanitize_filename(label).replace(' ', "-")
}

/// File name for a page, without extension, from its slug or title.
///
/// Slugs are URL-encoded, so encoded spaces and colons are turned into
/// dashes before sanitizing.
pub fn page_file_stem(explicit_slug: Option<&str>, title: &str) -> String {
    match explicit_slug.map(|s| s.trim_matches('/')).filter(|s| !s.is_empty()) {
        Some(slug) => sanitize_filename(&slug.replace("%20", "-").replace("%3A", "-")),
        None => sanitize_filename(title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Hello/World"), "Hello_World");
        assert_eq!(sanitize_filename("What's new?"), "Whats new-");
        assert_eq!(sanitize_filename("\u{201c}Quoted\u{201d}"), "Quoted");
        assert_eq!(sanitize_filename("   spaces   "), "spaces");
        assert_eq!(sanitize_filename(""), "unnamed");
    }

    #[test]
    fn levels_use_dashes_for_spaces() {
        assert_eq!(level_directory_name("Getting Started"), "Getting-Started");
    }

    #[test]
    fn explicit_slugs_name_the_file() {
        assert_eq!(page_file_stem(Some("/getting%20started"), "Title"), "getting-started");
        assert_eq!(page_file_stem(None, "My Page"), "My Page");
        assert_eq!(page_file_stem(Some("/"), "Home"), "Home");
    }
}
