//! Penn Treebank style constituency trees.
//!
//! A [`Tree`] is an arena of [`Node`]s addressed by [`NodeId`]. Each node
//! keeps an ordered child list and a back-reference to its parent, so the
//! structural edits in [`edit`] are index manipulations instead of sibling
//! pointer relinking.
//!
//! ```text
//! bracket text ──→ Lexer ──→ TreeBuilder ──→ Tree { nodes, root, words }
//!                                               │
//!                                   edit (detach / insert / splice)
//!                                               │
//!                                   text (words, bracket text, statement)
//! ```
//!
//! Detached nodes stay in the arena; they are simply unreachable from the root.

pub mod builder;
pub mod edit;
pub mod label;
pub mod lexer;
pub mod text;

pub use builder::DEFAULT_MAX_DEPTH;
pub use label::{NodeKind, Phrase, PosTag};

/// Index of a node inside its owning [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node:{}", self.0)
    }
}

/// One constituent or leaf.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A parsed question.
///
/// Built once from bracket text; [`crate::rewrite::adjust_order`] then
/// rewrites it destructively, after which it only serves for inspection.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    words: Vec<String>,
    question: String,
    raw_text: String,
    rewritten: bool,
}

impl Tree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Leaf words in document order, as captured at parse time.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The leaf words joined with single spaces.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The input exactly as given to [`Tree::parse`].
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Whether a rewrite has already consumed this tree.
    pub fn is_rewritten(&self) -> bool {
        self.rewritten
    }

    pub(crate) fn mark_rewritten(&mut self) {
        self.rewritten = true;
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.node_mut(id).kind = kind;
    }

    pub fn phrase(&self, id: NodeId) -> Option<Phrase> {
        match self.kind(id) {
            NodeKind::Phrase(p) => Some(*p),
            _ => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<PosTag> {
        match self.kind(id) {
            NodeKind::Tag(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_phrase(&self, id: NodeId, phrase: Phrase) -> bool {
        self.phrase(id) == Some(phrase)
    }

    pub fn is_tag(&self, id: NodeId, tag: PosTag) -> bool {
        self.tag(id) == Some(tag)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.first().copied()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// The sibling right after `id` in its parent's child list.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// The word held by a leaf.
    pub fn word(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Word(w) => Some(w),
            _ => None,
        }
    }

    /// The word under a preterminal, i.e. its first child's word.
    pub fn head_word(&self, id: NodeId) -> Option<&str> {
        self.first_child(id).and_then(|c| self.word(c))
    }

    /// Replace the word under a preterminal. Returns `false` if `id` has no
    /// leaf as its first child.
    pub fn set_head_word(&mut self, id: NodeId, word: impl Into<String>) -> bool {
        match self.first_child(id) {
            Some(leaf) if self.kind(leaf).is_word() => {
                self.node_mut(leaf).kind = NodeKind::Word(word.into());
                true
            }
            _ => false,
        }
    }

    /// Pre-order dump of every node token reachable from the root.
    ///
    /// Debugging aid only.
    pub fn traverse(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(self.kind(id).token().to_string());
            stack.extend(self.children(id).iter().rev());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IS_HE_HAPPY: &str = "(ROOT (SQ (VBZ Is) (NP (PRP he)) (ADJP (JJ happy)) (. ?)))";

    #[test]
    fn accessors_follow_structure() {
        let tree = Tree::parse(IS_HE_HAPPY).unwrap();
        let root = tree.root();
        assert!(tree.is_phrase(root, Phrase::Root));

        let sq = tree.first_child(root).unwrap();
        assert!(tree.is_phrase(sq, Phrase::Sq));
        assert_eq!(tree.parent(sq), Some(root));
        assert_eq!(tree.next_sibling(sq), None);

        let verb = tree.first_child(sq).unwrap();
        assert!(tree.is_tag(verb, PosTag::Vbz));
        assert_eq!(tree.head_word(verb), Some("is"));

        let np = tree.next_sibling(verb).unwrap();
        assert!(tree.is_phrase(np, Phrase::Np));
        assert_eq!(tree.head_word(np), None);
    }

    #[test]
    fn words_and_question() {
        let tree = Tree::parse(IS_HE_HAPPY).unwrap();
        assert_eq!(tree.words(), ["is", "he", "happy", "?"]);
        assert_eq!(tree.question(), "is he happy ?");
        assert_eq!(tree.raw_text(), IS_HE_HAPPY);
        assert!(!tree.is_rewritten());
    }

    #[test]
    fn traverse_is_preorder() {
        let tree = Tree::parse("(ROOT (NP (DT the) (NN cat)))").unwrap();
        assert_eq!(
            tree.traverse(),
            ["ROOT", "NP", "DT", "the", "NN", "cat"]
        );
    }

    #[test]
    fn set_head_word_rewrites_leaf() {
        let mut tree = Tree::parse("(VP (VBZ does) (VB go))").unwrap();
        let verb = tree.first_child(tree.root()).unwrap();
        assert!(tree.set_head_word(verb, ""));
        assert_eq!(tree.head_word(verb), Some(""));
        assert!(!tree.set_head_word(tree.root(), "x"));
    }
}
