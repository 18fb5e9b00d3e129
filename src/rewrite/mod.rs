//! Question → cloze statement rewriting.
//!
//! [`adjust_order`] classifies the top clause and routes it through one of
//! four strategies:
//!
//! ```text
//! FRAG  "how many ..."          ──→ "there are <marker> ..." shortcut
//! SQ / SBARQ(SQ)                ──→ yes/no: un-invert, marker after subject
//! SBARQ(WH* SQ)                 ─┐
//! SBAR(WHADJP S) "how many ..." ─┴→ WH: convert WH → un-invert → reinsert
//! ```
//!
//! The WH pipeline runs three stages in order: [`answer`] turns the
//! WH-phrase into a marker constituent, [`uninvert`] restores declarative
//! order, and [`reinsert`] puts the marker where the answer belongs.
//!
//! Rewriting mutates the tree in place and is single-use.

pub mod answer;
pub mod matchers;
pub mod reinsert;
pub mod uninvert;
pub mod yes_no;

use crate::error::{ClauseStage, RewriteError, RewriteResult};
use crate::tree::{NodeId, NodeKind, Phrase, PosTag, Tree};

/// The placeholder used when no other marker is configured.
pub const DEFAULT_MARKER: &str = "**blank**";

/// Settings threaded into a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Log the question and its raw parse when the rewrite fails.
    pub diagnostics: bool,
    /// Placeholder text for the answer.
    pub marker: String,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            diagnostics: false,
            marker: DEFAULT_MARKER.into(),
        }
    }
}

/// Rewrite a parsed question into a declarative statement with the answer
/// replaced by the marker.
///
/// The tree is consumed: a second call fails with
/// [`RewriteError::AlreadyRewritten`], whether or not the first succeeded.
/// A blank marker is rejected up front and leaves the tree untouched.
pub fn adjust_order(tree: &mut Tree, options: &RewriteOptions) -> RewriteResult<String> {
    if tree.is_rewritten() {
        return Err(RewriteError::AlreadyRewritten);
    }
    if options.marker.trim().is_empty() {
        return Err(RewriteError::precondition(
            "the marker must contain visible text",
        ));
    }
    tree.mark_rewritten();

    let result = Rewriter {
        tree: &mut *tree,
        options,
    }
    .run();
    if let Err(err) = &result {
        if options.diagnostics {
            tracing::warn!(
                question = tree.question(),
                raw = tree.raw_text(),
                error = %err,
                "question rejected"
            );
        }
    }
    result
}

/// Working state for one rewrite. Rule sets live in the submodules as
/// further `impl` blocks.
pub(crate) struct Rewriter<'t> {
    tree: &'t mut Tree,
    options: &'t RewriteOptions,
}

impl Rewriter<'_> {
    fn run(mut self) -> RewriteResult<String> {
        let root = self.tree.root();
        let top = self
            .tree
            .first_child(root)
            .ok_or_else(|| self.unknown_question(root))?;

        if self.tree.is_phrase(top, Phrase::Frag) && self.opens_with_how_many() {
            tracing::debug!(route = "how-many", "dispatching question");
            return Ok(self.how_many_shortcut());
        }

        self.delete_period(top)?;
        if self.tree.children(root).len() != 1 {
            return Err(RewriteError::precondition(
                "the root must hold exactly one clause",
            ));
        }

        match self.tree.phrase(top) {
            Some(Phrase::Sq) => {
                tracing::debug!(route = "yes/no", "dispatching question");
                self.yes_no(top)?;
            }
            Some(Phrase::Sbarq) => self.dispatch_sbarq(top)?,
            Some(Phrase::Sbar) => self.dispatch_sbar(top)?,
            _ => return Err(self.unknown_question(top)),
        }
        Ok(self.tree.statement())
    }

    fn dispatch_sbarq(&mut self, top: NodeId) -> RewriteResult<()> {
        let first = self
            .tree
            .first_child(top)
            .ok_or_else(|| self.unknown_question(top))?;
        let second = self.tree.next_sibling(first);

        if self.tree.is_phrase(first, Phrase::Sq) && second.is_none() {
            tracing::debug!(route = "yes/no", "dispatching question");
            return self.yes_no(first);
        }
        match second {
            Some(clause)
                if self.tree.phrase(first).is_some_and(Phrase::is_wh)
                    && self.tree.is_phrase(clause, Phrase::Sq) =>
            {
                tracing::debug!(route = "wh", "dispatching question");
                let wh = self.tree.detach_subtree(first)?;
                self.wh_question(wh, clause)
            }
            _ => Err(self.unknown_question(top)),
        }
    }

    fn dispatch_sbar(&mut self, top: NodeId) -> RewriteResult<()> {
        let first = self
            .tree
            .first_child(top)
            .ok_or_else(|| self.unknown_question(top))?;
        match self.tree.next_sibling(first) {
            Some(clause)
                if self.tree.is_phrase(first, Phrase::Whadjp)
                    && self.tree.is_phrase(clause, Phrase::S)
                    && self.opens_with_how_many() =>
            {
                tracing::debug!(route = "wh-relative", "dispatching question");
                let wh = self.tree.detach_subtree(first)?;
                self.wh_question(wh, clause)
            }
            _ => Err(self.unknown_question(top)),
        }
    }

    fn wh_question(&mut self, wh: NodeId, clause: NodeId) -> RewriteResult<()> {
        self.convert_wh(wh)?;
        tracing::debug!(wh = %self.tree.bracket_text(wh), "converted WH-phrase");
        self.uninvert(clause, wh)?;
        tracing::debug!(clause = %self.tree.bracket_text(clause), "un-inverted clause");
        self.reinsert(wh, clause)
    }

    /// Emit `there are <marker>` plus the remaining words, minus the final
    /// punctuation, without touching the tree.
    fn how_many_shortcut(&self) -> String {
        let words = self.tree.words();
        let end = words.len().saturating_sub(1).max(2);
        let mut out = vec!["there", "are", self.options.marker.as_str()];
        out.extend(words[2..end].iter().map(String::as_str));
        out.join(" ")
    }

    /// Drop the terminal period and everything after it from the top clause.
    fn delete_period(&mut self, top: NodeId) -> RewriteResult<()> {
        let children = self.tree.children(top);
        match children.first() {
            None => return Err(RewriteError::precondition("the top clause is empty")),
            Some(&first) if self.tree.is_tag(first, PosTag::Period) => {
                return Err(RewriteError::precondition(
                    "the top clause starts with its terminal period",
                ));
            }
            Some(_) => {}
        }
        let pos = children
            .iter()
            .skip(1)
            .position(|&c| self.tree.is_tag(c, PosTag::Period))
            .map(|p| p + 1)
            .ok_or_else(|| RewriteError::precondition("no terminal period in the top clause"))?;

        let trailing = children[pos..].to_vec();
        for id in trailing {
            self.tree.detach_subtree(id)?;
        }
        Ok(())
    }

    fn opens_with_how_many(&self) -> bool {
        matches!(self.tree.words(), [first, second, ..] if first == "how" && second == "many")
    }

    /// Whether the question's first word is `word`.
    fn opens_with(&self, word: &str) -> bool {
        self.tree.words().first().is_some_and(|w| w == word)
    }

    /// Allocate an answer constituent: `(A [before] <marker> [after])`.
    fn answer_node(&mut self, before: &str, after: &str) -> NodeId {
        let mut text = self.options.marker.clone();
        if !before.is_empty() {
            text = format!("{before} {text}");
        }
        if !after.is_empty() {
            text = format!("{text} {after}");
        }
        self.tree
            .new_preterminal(NodeKind::Phrase(Phrase::Answer), text)
    }

    /// Put `(BY by)` in front of the WH constituent's contents.
    fn prefix_by(&mut self, wh: NodeId) -> RewriteResult<()> {
        let by = self.tree.new_preterminal(NodeKind::Phrase(Phrase::By), "by");
        self.tree.insert_first_child(by, wh)?;
        Ok(())
    }

    /// Detach `node` and reattach it as `anchor`'s next sibling.
    fn move_after(&mut self, node: NodeId, anchor: NodeId) -> RewriteResult<()> {
        self.tree.detach_subtree(node)?;
        self.tree.insert_after(node, anchor)?;
        Ok(())
    }

    fn unknown_question(&self, top: NodeId) -> RewriteError {
        RewriteError::UnknownQuestionStructure {
            label: self.tree.kind(top).token().to_string(),
        }
    }

    fn unknown_clause(&self, stage: ClauseStage, clause: NodeId) -> RewriteError {
        let shape = self
            .tree
            .children(clause)
            .iter()
            .map(|&c| self.tree.kind(c).token())
            .collect::<Vec<_>>()
            .join(" ");
        RewriteError::UnknownSqStructure { stage, shape }
    }
}
