//! Tree construction from bracket notation.
//!
//! The grammar is `tree := '(' LABEL tree+ ')' | WORD`. Descent keeps the
//! open constituents on an explicit stack so input nesting cannot exhaust
//! the call stack; [`DEFAULT_MAX_DEPTH`] bounds it instead.

use super::label::NodeKind;
use super::lexer::{self, Lexer, Span, Token, TokenKind};
use super::{Node, NodeId, Tree};
use crate::error::{TreeError, TreeResult};

/// Nesting bound applied by [`Tree::parse`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

impl Tree {
    /// Parse one bracket-notation tree.
    ///
    /// Line breaks are stripped first. Leaf words are lower-cased and
    /// recorded in document order.
    pub fn parse(text: &str) -> TreeResult<Self> {
        Self::parse_with_depth(text, DEFAULT_MAX_DEPTH)
    }

    /// Parse with a custom nesting bound.
    pub fn parse_with_depth(text: &str, max_depth: usize) -> TreeResult<Self> {
        let normalized = lexer::normalize(text);
        let mut builder = TreeBuilder::new(&normalized, max_depth);
        let root = builder.build()?;

        let TreeBuilder { nodes, words, .. } = builder;
        let question = words.join(" ");
        Ok(Tree {
            nodes,
            root,
            words,
            question,
            raw_text: text.to_string(),
            rewritten: false,
        })
    }
}

struct TreeBuilder<'a> {
    text: &'a str,
    lexer: Lexer<'a>,
    max_depth: usize,
    nodes: Vec<Node>,
    words: Vec<String>,
}

impl<'a> TreeBuilder<'a> {
    fn new(text: &'a str, max_depth: usize) -> Self {
        Self {
            text,
            lexer: Lexer::new(text),
            max_depth,
            nodes: Vec::new(),
            words: Vec::new(),
        }
    }

    fn build(&mut self) -> TreeResult<NodeId> {
        let mut open: Vec<NodeId> = Vec::new();
        let mut root = None;

        while let Some(token) = self.lexer.next() {
            if root.is_some() && open.is_empty() {
                return Err(self.malformed("unexpected input after the end of the tree", token.span));
            }

            match token.kind {
                TokenKind::Open => {
                    let label = match self.lexer.next() {
                        Some(Token {
                            kind: TokenKind::Atom(label),
                            ..
                        }) => label,
                        Some(other) => {
                            return Err(self.malformed("expected a label after `(`", other.span));
                        }
                        None => return Err(self.unexpected_end()),
                    };
                    if open.len() >= self.max_depth {
                        return Err(TreeError::TooDeep {
                            limit: self.max_depth,
                        });
                    }
                    let parent = open.last().copied();
                    let id = self.push(NodeKind::from_label(label), parent);
                    if parent.is_none() {
                        root = Some(id);
                    }
                    open.push(id);
                }
                TokenKind::Close => {
                    let Some(id) = open.pop() else {
                        return Err(self.malformed("unbalanced `)`", token.span));
                    };
                    if self.nodes[id.index()].children.is_empty() {
                        return Err(self.malformed("constituent has no children", token.span));
                    }
                }
                TokenKind::Atom(surface) => {
                    let word = surface.to_lowercase();
                    let parent = open.last().copied();
                    let id = self.push(NodeKind::Word(word.clone()), parent);
                    self.words.push(word);
                    if parent.is_none() {
                        root = Some(id);
                    }
                }
            }
        }

        if !open.is_empty() {
            return Err(self.unexpected_end());
        }
        root.ok_or(TreeError::Empty)
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let mut node = Node::new(kind);
        node.parent = parent;
        self.nodes.push(node);
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    fn malformed(&self, reason: &str, span: Span) -> TreeError {
        TreeError::Malformed {
            reason: reason.to_string(),
            src: self.text.to_string(),
            span: span.into(),
        }
    }

    fn unexpected_end(&self) -> TreeError {
        let end = self.text.len();
        self.malformed(
            "unexpected end of input, missing `)`",
            Span { start: end, end },
        )
    }
}
