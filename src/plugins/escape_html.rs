// src/plugins/escape_html.rs
//! Angle brackets in prose would be parsed as JSX by MDX, so they are
//! escaped before conversion. Code stays verbatim.

use super::Plugin;
use crate::model::Block;

pub(super) fn plugin() -> Plugin {
    Plugin::new("escape html").with_block_modifier(escape_block)
}

fn escape_block(block: &mut Block) {
    if matches!(block, Block::Code(_)) {
        return;
    }
    for runs in block.rich_text_runs_mut() {
        for run in runs.iter_mut().filter(|r| !r.annotations.code) {
            run.map_text(escape_angle_brackets);
        }
    }
}

pub fn escape_angle_brackets(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeBlock, TableRowBlock, TextBlockContent};
    use crate::types::{Annotations, RichTextItem};
    use pretty_assertions::assert_eq;

    fn texts(block: &mut Block) -> Vec<String> {
        block
            .rich_text_runs_mut()
            .into_iter()
            .flat_map(|runs| runs.iter().map(|r| r.plain_text.clone()).collect::<Vec<_>>())
            .collect()
    }

    #[test]
    fn prose_is_escaped_but_code_runs_are_not() {
        let mut block = Block::paragraph(vec![
            RichTextItem::plain_text("a <b> c"),
            RichTextItem::plain_text("<div>").with_annotations(Annotations::code()),
        ]);
        escape_block(&mut block);
        assert_eq!(texts(&mut block), vec!["a &lt;b&gt; c", "<div>"]);
    }

    #[test]
    fn code_blocks_are_untouched() {
        let mut block = Block::Code(CodeBlock {
            content: TextBlockContent::new(vec![RichTextItem::plain_text("Vec<u8>")]),
            ..CodeBlock::default()
        });
        escape_block(&mut block);
        assert_eq!(texts(&mut block), vec!["Vec<u8>"]);
    }

    #[test]
    fn table_cells_are_escaped() {
        let mut block = Block::TableRow(TableRowBlock {
            cells: vec![vec![RichTextItem::plain_text("x > y")]],
            ..TableRowBlock::default()
        });
        escape_block(&mut block);
        assert_eq!(texts(&mut block), vec!["x &gt; y"]);
    }
}
