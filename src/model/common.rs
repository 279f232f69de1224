// src/model/common.rs
use crate::types::BlockId;

/// Fields shared by every block.
///
/// Children are not stored on the block: they are listed from the block
/// source when a converter or the engine needs them.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCommon {
    pub id: BlockId,
    /// Set when the block sits inside another block (columns, toggles, list
    /// items); `None` for blocks directly under a page.
    pub parent_block: Option<BlockId>,
    pub has_children: bool,
    pub archived: bool,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            parent_block: None,
            has_children: false,
            archived: false,
        }
    }

    pub fn with_children(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }

    pub fn with_parent(mut self, parent: BlockId) -> Self {
        self.parent_block = Some(parent);
        self
    }
}

impl Default for BlockCommon {
    fn default() -> Self {
        Self::new(BlockId::new_v4())
    }
}
