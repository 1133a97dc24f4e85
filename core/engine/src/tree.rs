//! FILENAME: core/engine/src/tree.rs
//! Hierarchical (tree) variant of the translated-value cache.
//!
//! Tree tables hold their rows as nested nodes. The cache must cover every
//! node, including those under collapsed parents, so sorting and filtering
//! behave the same once a subtree is expanded. Traversal is an explicit
//! breadth-first queue to keep stack usage flat on deep hierarchies.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::table::TableConfig;

/// One node of a tree table. Dropping is iterative; the derived `Clone`,
/// `PartialEq` and serde impls recurse once per level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub data: Value,
    #[serde(default)]
    pub children: Vec<TreeNode>,
    #[serde(default)]
    pub expanded: bool,
}

impl TreeNode {
    pub fn new(data: Value) -> Self {
        TreeNode {
            data,
            children: Vec::new(),
            expanded: false,
        }
    }

    pub fn with_children(data: Value, children: Vec<TreeNode>) -> Self {
        TreeNode {
            data,
            children,
            expanded: false,
        }
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Breadth-first iterator over a forest, ignoring expansion state.
pub struct BreadthFirst<'a> {
    queue: VecDeque<&'a TreeNode>,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children.iter());
        Some(node)
    }
}

pub fn breadth_first(roots: &[TreeNode]) -> BreadthFirst<'_> {
    BreadthFirst {
        queue: roots.iter().collect(),
    }
}

impl TableConfig {
    /// `build_translated_cache` over every node of the forest.
    pub fn build_cache_for_tree(&mut self, roots: &[TreeNode]) {
        self.build_translated_cache(breadth_first(roots).map(|node| &node.data));
    }

    /// `translation_keys` over every node of the forest.
    pub fn tree_translation_keys(&self, roots: &[TreeNode]) -> Vec<String> {
        self.translation_keys(breadth_first(roots).map(|node| &node.data))
    }
}
