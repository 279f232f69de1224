// src/plugins/embeds.rs
//! Rewrites of embed-style links into media Docusaurus can show inline.
//!
//! Only links labelled `embed`, `bookmark` or `video`, or labelled with a
//! URL, are touched, so a hand-written link to a video page in prose stays a
//! link. Bookmarks reach these rules as `[url](url)` after the link pass.

use super::{Plugin, RegexModification, Replacement};
use crate::constants::REACT_PLAYER_IMPORT;
use crate::error::AppError;

const REACT_PLAYER: &str = r#"<ReactPlayer controls url="$1" />"#;

/// Labels that mark a link as an embed.
const EMBED_LABEL: &str = r"(?:embed|bookmark|video|https?://[^\]]*)";
const BOOKMARK_LABEL: &str = r"(?:embed|bookmark|https?://[^\]]*)";

pub(super) fn gif_plugin() -> Result<Plugin, AppError> {
    Ok(Plugin::new("gif").with_regex(RegexModification::new(
        &format!(r"\[{}\]\(([^)]*\.gif)\)", EMBED_LABEL),
        Replacement::Pattern("![]($1)".to_string()),
    )?))
}

pub(super) fn imgur_plugin() -> Result<Plugin, AppError> {
    Ok(Plugin::new("imgur").with_regex(RegexModification::new(
        &format!(r"\[{}\]\((https://imgur\.com/[^)]*)\)", BOOKMARK_LABEL),
        Replacement::Pattern("![]($1.gif)".to_string()),
    )?))
}

pub(super) fn youtube_plugin() -> Result<Plugin, AppError> {
    Ok(Plugin::new("youtube").with_regex(
        RegexModification::new(
            &format!(
                r"\[{}\]\((https?://(?:www\.)?(?:youtube\.com/watch[^)]*|youtu\.be/[^)]*))\)",
                EMBED_LABEL
            ),
            Replacement::Pattern(REACT_PLAYER.to_string()),
        )?
        .with_import(REACT_PLAYER_IMPORT),
    ))
}

pub(super) fn vimeo_plugin() -> Result<Plugin, AppError> {
    Ok(Plugin::new("vimeo").with_regex(
        RegexModification::new(
            &format!(r"\[{}\]\((https://vimeo\.com/[^)]*)\)", EMBED_LABEL),
            Replacement::Pattern(REACT_PLAYER.to_string()),
        )?
        .with_import(REACT_PLAYER_IMPORT),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(plugin: Plugin) -> RegexModification {
        plugin.regex_modifications.into_iter().next().unwrap()
    }

    #[test]
    fn gif_links_match_only_embed_labels() {
        let rule = rule(gif_plugin().unwrap());
        assert!(rule.regex.is_match("[embed](https://media.giphy.com/cat.gif)"));
        assert!(!rule.regex.is_match("[a cat](https://media.giphy.com/cat.gif)"));
        assert!(rule
            .regex
            .is_match("[https://media.giphy.com/cat.gif](https://media.giphy.com/cat.gif)"));
    }

    #[test]
    fn video_hosts_request_the_player_import() {
        let youtube = rule(youtube_plugin().unwrap());
        assert!(youtube.regex.is_match("[embed](https://www.youtube.com/watch?v=abc)"));
        assert_eq!(youtube.imports, vec![REACT_PLAYER_IMPORT.to_string()]);
        let vimeo = rule(vimeo_plugin().unwrap());
        assert!(vimeo.regex.is_match("[video](https://vimeo.com/123)"));
    }
}
