// src/transform/rewrite.rs
//! Passes over the rendered Markdown of a page.
//!
//! Both passes find every match in the unchanged input first and then
//! assemble the output from the text between matches, so a replacement can
//! never be matched again and repeated link text is rewritten at each of its
//! own positions.

use crate::error::AppError;
use crate::plugins::{PluginContext, RegexModification, Replacement, RuleMatch};
use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\[\]]*\]\([^)]*\)").expect("valid markdown link regex"));

/// Give every `[label](target)` link to the first link modifier that matches
/// it and changes it. Image syntax (`![alt](src)`) is left alone.
pub fn fix_links(ctx: &PluginContext<'_>, markdown: &str) -> String {
    let mut output = String::with_capacity(markdown.len());
    let mut last = 0;

    for found in MARKDOWN_LINK.find_iter(markdown) {
        if markdown[..found.start()].ends_with('!') {
            continue;
        }
        let original = found.as_str();
        let converted = ctx
            .plugins()
            .link_modifiers()
            .filter(|(_, modifier)| modifier.matcher.is_match(original))
            .map(|(name, modifier)| (name, (modifier.convert)(ctx, original)))
            .find(|(_, converted)| converted != original);

        if let Some((plugin, converted)) = converted {
            log::debug!("{} rewrote {} to {}", plugin, original, converted);
            output.push_str(&markdown[last..found.start()]);
            output.push_str(&converted);
            last = found.end();
        }
    }
    output.push_str(&markdown[last..]);
    output
}

struct Found {
    start: usize,
    end: usize,
    rule_match: RuleMatch,
}

fn find_matches(rule: &RegexModification, input: &str) -> Vec<Found> {
    let (regex, offset) = if rule.include_code_blocks {
        (&rule.regex, 0)
    } else {
        (&rule.fenced, 1)
    };
    let group_count = rule.regex.captures_len().saturating_sub(1);

    regex
        .captures_iter(input)
        .filter(|caps| rule.include_code_blocks || caps.name("fence").is_none())
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let groups = (1..=group_count)
                .map(|i| caps.get(i + offset).map(|m| m.as_str().to_string()))
                .collect();
            Some(Found {
                start: whole.start(),
                end: whole.end(),
                rule_match: RuleMatch {
                    text: whole.as_str().to_string(),
                    groups,
                },
            })
        })
        .collect()
}

/// Substitute `$1`..`$9` in a static replacement.
fn expand_pattern(pattern: &str, found: &RuleMatch) -> String {
    (1..=9).rev().fold(pattern.to_string(), |text, index| {
        text.replace(&format!("${}", index), found.group(index))
    })
}

async fn apply_rule(
    ctx: &mut PluginContext<'_>,
    rule: &RegexModification,
    input: &str,
) -> Result<String, AppError> {
    let matches = find_matches(rule, input);
    if matches.is_empty() {
        return Ok(input.to_string());
    }

    let mut output = String::with_capacity(input.len());
    let mut last = 0;
    for found in &matches {
        let replacement = match &rule.replacement {
            Replacement::Pattern(pattern) => expand_pattern(pattern, &found.rule_match),
            Replacement::Compute(replacer) => replacer.replace(ctx, &found.rule_match).await?,
        };
        output.push_str(&input[last..found.start]);
        output.push_str(&replacement);
        last = found.end;
    }
    output.push_str(&input[last..]);

    for import in &rule.imports {
        ctx.add_import(import);
    }
    Ok(output)
}

/// Run every plugin's regex modifications, in plugin order.
pub async fn apply_regex_modifications(
    ctx: &mut PluginContext<'_>,
    markdown: &str,
) -> Result<String, AppError> {
    let mut body = markdown.to_string();
    let plugins = ctx.plugins();
    for (plugin, rule) in plugins.regex_modifications() {
        let rewritten = apply_rule(ctx, rule, &body).await?;
        if rewritten != body {
            log::debug!("{} rewrote page {}", plugin, ctx.page.slug());
        }
        body = rewritten;
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_code_is_skipped_unless_requested() {
        let rule = RegexModification::new(
            r"\[embed\]\((\S+\.gif)\)",
            Replacement::Pattern("![]($1)".to_string()),
        )
        .unwrap();
        let input = "[embed](a.gif)\n\n```\n[embed](b.gif)\n```\n";
        let found = find_matches(&rule, input);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule_match.group(1), "a.gif");

        let found = find_matches(&rule.including_code_blocks(), input);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn patterns_expand_numbered_groups() {
        let found = RuleMatch {
            text: "x".to_string(),
            groups: vec![Some("one".to_string()), Some("two".to_string())],
        };
        assert_eq!(expand_pattern("<$1 $2 $1>", &found), "<one two one>");
    }
}
