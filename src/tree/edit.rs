//! Structural edit primitives.
//!
//! Every rewrite rule is expressed through these operations. They only
//! change parent/child links; nodes are never freed, and new nodes come from
//! [`Tree::alloc`] or [`Tree::new_preterminal`] detached from the tree.

use super::label::NodeKind;
use super::{Node, NodeId, Tree};
use crate::error::{TreeError, TreeResult};

impl Tree {
    /// Add a detached node to the arena.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    /// Allocate a detached `(kind word)` pair.
    pub fn new_preterminal(&mut self, kind: NodeKind, word: impl Into<String>) -> NodeId {
        let wrapper = self.alloc(kind);
        let leaf = self.alloc(NodeKind::Word(word.into()));
        self.nodes[leaf.index()].parent = Some(wrapper);
        self.nodes[wrapper.index()].children.push(leaf);
        wrapper
    }

    /// Remove `node` and everything below it from its parent's child list.
    pub fn detach_subtree(&mut self, node: NodeId) -> TreeResult<NodeId> {
        let (parent, pos) = self.position(node)?;
        self.node_mut(parent).children.remove(pos);
        self.node_mut(node).parent = None;
        Ok(node)
    }

    /// Remove only `node`, promoting its children into the gap it leaves.
    pub fn detach_node(&mut self, node: NodeId) -> TreeResult<NodeId> {
        let (parent, pos) = self.position(node)?;
        let promoted = std::mem::take(&mut self.node_mut(node).children);
        for &child in &promoted {
            self.node_mut(child).parent = Some(parent);
        }
        self.node_mut(parent).children.splice(pos..=pos, promoted);
        self.node_mut(node).parent = None;
        Ok(node)
    }

    /// Splice the detached `new` in as `anchor`'s next sibling.
    pub fn insert_after(&mut self, new: NodeId, anchor: NodeId) -> TreeResult<()> {
        let (parent, pos) = self.position(anchor)?;
        self.check_insertable(new, parent)?;
        self.node_mut(parent).children.insert(pos + 1, new);
        self.node_mut(new).parent = Some(parent);
        Ok(())
    }

    /// Splice the detached `new` in at the head of `parent`'s children.
    pub fn insert_first_child(&mut self, new: NodeId, parent: NodeId) -> TreeResult<()> {
        self.check_insertable(new, parent)?;
        self.node_mut(parent).children.insert(0, new);
        self.node_mut(new).parent = Some(parent);
        Ok(())
    }

    /// Splice the detached `new` in at the tail of `parent`'s children.
    pub fn insert_last_child(&mut self, new: NodeId, parent: NodeId) -> TreeResult<()> {
        self.check_insertable(new, parent)?;
        self.node_mut(parent).children.push(new);
        self.node_mut(new).parent = Some(parent);
        Ok(())
    }

    /// Make the detached `new` the only child of `parent`, dropping the old
    /// children from the tree.
    pub fn replace_children(&mut self, parent: NodeId, new: NodeId) -> TreeResult<()> {
        self.check_insertable(new, parent)?;
        let old = std::mem::replace(&mut self.node_mut(parent).children, vec![new]);
        for child in old {
            self.node_mut(child).parent = None;
        }
        self.node_mut(new).parent = Some(parent);
        Ok(())
    }

    fn position(&self, node: NodeId) -> TreeResult<(NodeId, usize)> {
        let parent = self.parent(node).ok_or(TreeError::NotAttached { node })?;
        let pos = self
            .children(parent)
            .iter()
            .position(|&c| c == node)
            .ok_or(TreeError::NotAttached { node })?;
        Ok((parent, pos))
    }

    fn check_insertable(&self, new: NodeId, parent: NodeId) -> TreeResult<()> {
        if self.parent(new).is_some() {
            return Err(TreeError::AlreadyAttached { node: new });
        }
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == new {
                return Err(TreeError::WouldCycle { node: new });
            }
            cursor = self.parent(id);
        }
        Ok(())
    }
}
