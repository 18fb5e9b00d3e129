//! Clause un-inversion: put the fronted verb back behind its subject.
//!
//! `is the concert in the park` → `the concert is in the park`. Negations
//! fold into the verb (`ca n't` → `can not`) and a supporting "do" is
//! emptied. A clause already in subject-verb order is left alone.

use super::Rewriter;
use super::matchers::{
    DO_FORMS, is_infinitival, is_verbish, is_wh_adverbial_clause, skip_advp,
};
use crate::error::{ClauseStage, RewriteResult};
use crate::tree::{NodeId, Phrase, PosTag};

impl Rewriter<'_> {
    pub(super) fn uninvert(&mut self, clause: NodeId, wh: NodeId) -> RewriteResult<()> {
        let stage = ClauseStage::Uninvert;
        let first = skip_advp(self.tree, self.tree.first_child(clause))
            .ok_or_else(|| self.unknown_clause(stage, clause))?;

        if self.tree.is_phrase(first, Phrase::Vp) {
            return Ok(());
        }
        if self.tree.is_phrase(first, Phrase::Np) {
            if let Some(next) = self.tree.next_sibling(first) {
                if self.tree.is_phrase(next, Phrase::Vp) && self.tree.next_sibling(next).is_none() {
                    return Ok(());
                }
            }
        }

        if !is_verbish(self.tree, first) {
            return Err(self.unknown_clause(stage, clause));
        }
        self.expand_contraction(first);

        let Some(mut second) = skip_advp(self.tree, self.tree.next_sibling(first)) else {
            return Ok(());
        };

        if self.is_negation(second) {
            let verb = self.tree.head_word(first).unwrap_or_default();
            let negated = if verb == "ca" {
                "can not".to_string()
            } else {
                format!("{verb} not")
            };
            self.tree.set_head_word(first, negated);
            self.tree.detach_subtree(second)?;
            second = skip_advp(self.tree, self.tree.next_sibling(first))
                .ok_or_else(|| self.unknown_clause(stage, clause))?;
        } else if self
            .tree
            .head_word(first)
            .is_some_and(|w| DO_FORMS.contains(&w))
        {
            self.tree.set_head_word(first, "");
        }

        let tail = self.tree.next_sibling(second);
        if tail.is_none()
            && matches!(
                self.tree.phrase(second),
                Some(Phrase::Pp | Phrase::Adjp | Phrase::Vp)
            )
        {
            return Ok(());
        }

        if self.tree.is_phrase(second, Phrase::Np) {
            match tail {
                None => {
                    if let Some(head) = self.splittable_subject(second, wh) {
                        tracing::trace!(subject = %self.tree.bracket_text(second), "splitting subject");
                        self.tree.detach_node(second)?;
                        self.tree.detach_subtree(first)?;
                        self.tree.insert_after(first, head)?;
                        return Ok(());
                    }
                    return self.move_after(first, second);
                }
                Some(after) => match skip_advp(self.tree, Some(after)) {
                    None => return self.move_after(first, second),
                    Some(third)
                        if self.tree.next_sibling(third).is_none()
                            && (matches!(
                                self.tree.phrase(third),
                                Some(Phrase::Adjp | Phrase::Pp | Phrase::Np | Phrase::Vp)
                            ) || is_infinitival(self.tree, third)) =>
                    {
                        return self.move_after(first, second);
                    }
                    Some(_) => {}
                },
            }
        }

        Err(self.unknown_clause(stage, clause))
    }

    /// `'s` → `is`, `'re` → `are`, `'ve` → `have`.
    fn expand_contraction(&mut self, verb: NodeId) {
        let full = match self.tree.head_word(verb) {
            Some("'s") => "is",
            Some("'re") => "are",
            Some("'ve") => "have",
            _ => return,
        };
        self.tree.set_head_word(verb, full);
    }

    fn is_negation(&self, id: NodeId) -> bool {
        self.tree.is_tag(id, PosTag::Rb) && matches!(self.tree.head_word(id), Some("n't" | "not"))
    }

    /// For a subject NP shaped `(NP (NP head) rest)`, decide whether the verb
    /// belongs between `head` and `rest`. Returns `head` if so.
    fn splittable_subject(&self, np: NodeId, wh: NodeId) -> Option<NodeId> {
        let t = &*self.tree;
        let head = t.first_child(np).filter(|&id| t.is_phrase(id, Phrase::Np))?;
        let rest = t.next_sibling(head)?;
        if t.next_sibling(rest).is_some() {
            return None;
        }

        let split = match t.phrase(rest) {
            Some(Phrase::Pp) => {
                t.is_phrase(wh, Phrase::Whadvp)
                    || t
                        .first_child(rest)
                        .is_some_and(|p| t.is_tag(p, PosTag::In) && t.next_sibling(p).is_none())
            }
            Some(Phrase::Np) => t.phrase_text(head) == "there",
            Some(Phrase::Adjp) => true,
            Some(Phrase::Sbar) => is_wh_adverbial_clause(t, rest),
            _ => false,
        };
        split.then_some(head)
    }
}
