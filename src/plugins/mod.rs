// src/plugins/mod.rs
//! Plugins: named bundles of hooks into page conversion.
//!
//! A plugin may carry block modifiers (run on raw blocks before
//! conversion), per-type block converters, one link modifier and any number
//! of regex rewrites over the rendered Markdown. The registry keeps plugins
//! in order; that order is the precedence for link rewriting and the
//! execution order for every other hook.

mod callouts;
mod columns;
pub mod context;
mod embeds;
mod escape_html;
mod headings;
mod images;
mod links;
mod mermaid;
mod numbered_lists;
mod tables;
mod video;

pub use callouts::admonition_kind;
pub use context::{PluginContext, RunContext};

use crate::error::AppError;
use crate::model::Block;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of a custom block converter.
#[derive(Debug, Clone, PartialEq)]
pub enum Converted {
    /// The converter produced the block's Markdown.
    Rendered(String),
    /// The converter declined; the default rendering applies.
    UseDefault,
}

/// Converts one block type to Markdown, with access to the page context.
#[async_trait::async_trait]
pub trait BlockConverter: Send + Sync {
    async fn convert(
        &self,
        ctx: &mut PluginContext<'_>,
        block: &Block,
    ) -> Result<Converted, AppError>;
}

/// Mutates a raw block before any conversion.
pub type BlockModifier = fn(&mut Block);

/// Rewrites whole Markdown links (`[label](target)`) that match `matcher`.
pub struct LinkModifier {
    pub matcher: Regex,
    pub convert: fn(&PluginContext<'_>, &str) -> String,
}

/// One match of a regex rule, handed to computed replacements.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    /// The whole matched text.
    pub text: String,
    /// Capture groups of the rule; `groups[0]` is `$1`.
    pub groups: Vec<Option<String>>,
}

impl RuleMatch {
    pub fn group(&self, index: usize) -> &str {
        self.groups
            .get(index.saturating_sub(1))
            .and_then(|g| g.as_deref())
            .unwrap_or("")
    }
}

/// Produces the replacement text for a regex rule match.
#[async_trait::async_trait]
pub trait MarkdownReplacer: Send + Sync {
    async fn replace(&self, ctx: &PluginContext<'_>, found: &RuleMatch)
        -> Result<String, AppError>;
}

#[derive(Clone)]
pub enum Replacement {
    /// Static text where `$1` stands for the first capture group.
    Pattern(String),
    Compute(Arc<dyn MarkdownReplacer>),
}

/// A regex rewrite over the rendered Markdown of a page.
#[derive(Clone)]
pub struct RegexModification {
    pub regex: Regex,
    /// `regex` alternated after a fenced-code-block pattern, so fences are
    /// consumed as whole matches and can be skipped.
    pub(crate) fenced: Regex,
    pub replacement: Replacement,
    pub include_code_blocks: bool,
    pub imports: Vec<String>,
}

const FENCED_CODE: &str = r"(?P<fence>```[^\n]*\n(?s:.*?)\n```)";

impl RegexModification {
    pub fn new(pattern: &str, replacement: Replacement) -> Result<Self, AppError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            fenced: Regex::new(&format!("{}|(?:{})", FENCED_CODE, pattern))?,
            replacement,
            include_code_blocks: false,
            imports: Vec::new(),
        })
    }

    pub fn including_code_blocks(mut self) -> Self {
        self.include_code_blocks = true;
        self
    }

    pub fn with_import(mut self, import: &str) -> Self {
        self.imports.push(import.to_string());
        self
    }
}

/// A named capability bundle.
#[derive(Default)]
pub struct Plugin {
    pub name: String,
    pub block_modifiers: Vec<BlockModifier>,
    pub converters: Vec<(&'static str, Arc<dyn BlockConverter>)>,
    pub link_modifier: Option<LinkModifier>,
    pub regex_modifications: Vec<RegexModification>,
}

impl Plugin {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_block_modifier(mut self, modifier: BlockModifier) -> Self {
        self.block_modifiers.push(modifier);
        self
    }

    /// Register `converter` for every block type in `block_types`.
    pub fn with_converter(
        mut self,
        block_types: &[&'static str],
        converter: Arc<dyn BlockConverter>,
    ) -> Self {
        for block_type in block_types {
            self.converters.push((block_type, converter.clone()));
        }
        self
    }

    pub fn with_link_modifier(mut self, modifier: LinkModifier) -> Self {
        self.link_modifier = Some(modifier);
        self
    }

    pub fn with_regex(mut self, modification: RegexModification) -> Self {
        self.regex_modifications.push(modification);
        self
    }
}

/// Ordered plugin list plus the block-type converter table built from it.
pub struct PluginRegistry {
    plugins: Vec<Plugin>,
    converters: HashMap<&'static str, Arc<dyn BlockConverter>>,
}

impl PluginRegistry {
    pub fn new(plugins: Vec<Plugin>) -> Self {
        // A later plugin's converter replaces an earlier one for the same type.
        let converters = plugins
            .iter()
            .flat_map(|p| p.converters.iter().cloned())
            .collect();
        Self {
            plugins,
            converters,
        }
    }

    /// The plugins every docs run uses, in precedence order.
    pub fn standard() -> Result<Self, AppError> {
        Ok(Self::new(vec![
            escape_html::plugin(),
            headings::plugin(),
            callouts::plugin(),
            columns::plugin(),
            tables::plugin(),
            numbered_lists::plugin(),
            images::plugin(),
            video::plugin(),
            links::internal_links_plugin()?,
            links::external_links_plugin()?,
            embeds::gif_plugin()?,
            embeds::imgur_plugin()?,
            embeds::youtube_plugin()?,
            embeds::vimeo_plugin()?,
            mermaid::plugin()?,
        ]))
    }

    /// Append a plugin after the existing ones.
    pub fn with_plugin(mut self, plugin: Plugin) -> Self {
        for (block_type, converter) in &plugin.converters {
            self.converters.insert(block_type, converter.clone());
        }
        self.plugins.push(plugin);
        self
    }

    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn converter_for(&self, block_type: &str) -> Option<&Arc<dyn BlockConverter>> {
        self.converters.get(block_type)
    }

    /// Run every plugin's block modifiers on `block`, in plugin order.
    pub fn modify_block(&self, block: &mut Block) {
        for plugin in &self.plugins {
            for modifier in &plugin.block_modifiers {
                modifier(block);
            }
        }
    }

    pub fn link_modifiers(&self) -> impl Iterator<Item = (&str, &LinkModifier)> {
        self.plugins
            .iter()
            .filter_map(|p| p.link_modifier.as_ref().map(|m| (p.name.as_str(), m)))
    }

    pub fn regex_modifications(&self) -> impl Iterator<Item = (&str, &RegexModification)> {
        self.plugins.iter().flat_map(|p| {
            p.regex_modifications
                .iter()
                .map(move |m| (p.name.as_str(), m))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    #[async_trait::async_trait]
    impl BlockConverter for Fixed {
        async fn convert(
            &self,
            _ctx: &mut PluginContext<'_>,
            _block: &Block,
        ) -> Result<Converted, AppError> {
            Ok(Converted::Rendered(self.0.to_string()))
        }
    }

    #[test]
    fn later_plugins_override_converters() {
        let registry = PluginRegistry::new(vec![
            Plugin::new("first").with_converter(&["paragraph"], Arc::new(Fixed("one"))),
        ])
        .with_plugin(Plugin::new("second").with_converter(&["paragraph"], Arc::new(Fixed("two"))));
        assert!(registry.converter_for("paragraph").is_some());
        assert!(registry.converter_for("quote").is_none());
        assert_eq!(registry.plugins().len(), 2);
    }

    #[test]
    fn standard_registry_compiles_every_rule() {
        let registry = PluginRegistry::standard().unwrap();
        assert!(registry.converter_for("callout").is_some());
        assert!(registry.converter_for("heading_3").is_some());
        assert_eq!(registry.link_modifiers().count(), 2);
        assert!(registry.regex_modifications().count() >= 5);
    }

    #[test]
    fn rule_groups_are_one_based() {
        let found = RuleMatch {
            text: "x".to_string(),
            groups: vec![Some("a".to_string()), None],
        };
        assert_eq!(found.group(1), "a");
        assert_eq!(found.group(2), "");
        assert_eq!(found.group(3), "");
    }
}
