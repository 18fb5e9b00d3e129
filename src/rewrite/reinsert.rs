//! Answer reinsertion: place the converted WH constituent where the answer
//! belongs in the declarative clause.
//!
//! Rules are tried in priority order against the clause's shape, counting
//! constituents after skipping adverb phrases:
//!
//! ```text
//! "why" questions           → last child       (he swims because <m>)
//! VP | VB* | VB* VP/PP/ADJP → first child      (<m> wrote the book)
//! NP                        → after NP
//! NP VB*                    → after the verb   (the capital is <m>)
//! NP VP                     → first (WHNP/WHADJP) or after VP (WHPP)
//! NP VB* X                  → depends on X; VPs are searched for the
//!                             innermost verb group and its complement
//! ```
//!
//! A `how` adverbial that lands after a passive or an adjective is written
//! `by <m>`.

use super::Rewriter;
use super::matchers::{
    BE_FORMS, infinitival_verb, is_infinitival, is_verbish, is_wh_adverbial_clause, skip_advp,
};
use crate::error::{ClauseStage, RewriteResult};
use crate::tree::{NodeId, Phrase, PosTag};

const STAGE: ClauseStage = ClauseStage::Reinsert;

impl Rewriter<'_> {
    pub(super) fn reinsert(&mut self, wh: NodeId, clause: NodeId) -> RewriteResult<()> {
        if self.opens_with("why") {
            self.tree.insert_last_child(wh, clause)?;
            return Ok(());
        }

        let first = skip_advp(self.tree, self.tree.first_child(clause))
            .ok_or_else(|| self.unknown_clause(STAGE, clause))?;

        if self.tree.next_sibling(first).is_none() {
            if self.tree.is_phrase(first, Phrase::Vp) {
                return self.place_first(wh, clause);
            }
            if self.tree.is_phrase(first, Phrase::Np) {
                return self.place_after(wh, first);
            }
            if is_verbish(self.tree, first) {
                return self.place_first(wh, clause);
            }
            return Err(self.unknown_clause(STAGE, clause));
        }

        let second = skip_advp(self.tree, self.tree.next_sibling(first));
        let first_verb = is_verbish(self.tree, first);
        let Some(second) = second else {
            if first_verb {
                return self.place_first(wh, clause);
            }
            return Err(self.unknown_clause(STAGE, clause));
        };

        if first_verb
            && self.tree.next_sibling(second).is_none()
            && matches!(
                self.tree.phrase(second),
                Some(Phrase::Vp | Phrase::Pp | Phrase::Adjp)
            )
        {
            return self.place_first(wh, clause);
        }

        let third = skip_advp(self.tree, self.tree.next_sibling(second));
        let first_np = self.tree.is_phrase(first, Phrase::Np);
        let second_verb = first_np && is_verbish(self.tree, second);

        if second_verb && third.is_none() {
            return self.place_after(wh, second);
        }

        if first_np
            && self.tree.is_phrase(second, Phrase::Vp)
            && self.tree.next_sibling(second).is_none()
        {
            match self.tree.phrase(wh) {
                Some(Phrase::Whnp | Phrase::Whadjp) => return self.place_first(wh, clause),
                Some(Phrase::Whpp) => return self.place_after(wh, second),
                _ => {}
            }
        }

        let third = third.ok_or_else(|| self.unknown_clause(STAGE, clause))?;
        if !second_verb || self.tree.next_sibling(third).is_some() {
            return Err(self.unknown_clause(STAGE, clause));
        }

        match self.tree.phrase(third) {
            Some(Phrase::Vp) => self.reinsert_into_verb_phrase(wh, clause, second, third),
            Some(Phrase::Np | Phrase::Pp) => self.place_after(wh, third),
            Some(Phrase::S) if is_infinitival(self.tree, third) => {
                let verb = infinitival_verb(self.tree, third)
                    .ok_or_else(|| self.unknown_clause(STAGE, clause))?;
                if self.tree.next_sibling(verb).is_none() && self.tree.is_phrase(wh, Phrase::Whnp) {
                    self.place_after(wh, verb)
                } else {
                    self.place_after(wh, second)
                }
            }
            Some(Phrase::Sbar) if is_wh_adverbial_clause(self.tree, third) => {
                self.place_after(wh, second)
            }
            Some(Phrase::Adjp) => {
                if self.is_how_adverbial(wh) {
                    self.prefix_by(wh)?;
                }
                self.place_after(wh, third)
            }
            _ => Err(self.unknown_clause(STAGE, clause)),
        }
    }

    /// `NP VB* VP`: descend through chained verb groups (`has been seen`) to
    /// the innermost VP and place the answer around its head verb.
    fn reinsert_into_verb_phrase(
        &mut self,
        wh: NodeId,
        clause: NodeId,
        verb: NodeId,
        vp: NodeId,
    ) -> RewriteResult<()> {
        let (mut verb, mut vp) = (verb, vp);
        while let Some(head) = self.tree.first_child(vp) {
            if !is_verbish(self.tree, head) {
                break;
            }
            match self.tree.next_sibling(head) {
                Some(next) if self.tree.is_phrase(next, Phrase::Vp) => {
                    verb = head;
                    vp = next;
                }
                _ => break,
            }
        }

        let fc = skip_advp(self.tree, self.tree.first_child(vp))
            .ok_or_else(|| self.unknown_clause(STAGE, clause))?;

        let passive = self
            .tree
            .head_word(verb)
            .and_then(|w| w.split_whitespace().next())
            .is_some_and(|w| BE_FORMS.contains(&w))
            && self.tree.is_tag(fc, PosTag::Vbn);
        if passive && self.tree.is_phrase(wh, Phrase::Whadvp) {
            if self.opens_with("how") {
                self.prefix_by(wh)?;
                return self.place_after(wh, vp);
            }
            if self.opens_with("why") || self.opens_with("where") {
                return self.place_after(wh, vp);
            }
        }

        if is_verbish(self.tree, fc) {
            match self.tree.next_sibling(fc) {
                None => return self.place_after(wh, vp),
                Some(sc) if self.tree.next_sibling(sc).is_none() => match self.tree.phrase(sc) {
                    Some(Phrase::Prt) => return self.place_after(wh, vp),
                    Some(Phrase::Pp) => {
                        if let Some(anchor) = self.prepositional_anchor(sc, fc, vp) {
                            return self.place_after(wh, anchor);
                        }
                    }
                    Some(Phrase::Sbar) => {
                        if matches!(self.tree.head_word(fc), Some("know" | "think")) {
                            if self.is_how_adverbial(wh) {
                                self.prefix_by(wh)?;
                            }
                            return self.place_after(wh, vp);
                        }
                        return self.place_after(wh, fc);
                    }
                    Some(Phrase::S) if is_infinitival(self.tree, sc) => {
                        let inner = infinitival_verb(self.tree, sc)
                            .ok_or_else(|| self.unknown_clause(STAGE, clause))?;
                        let anchor = match self.tree.next_sibling(inner) {
                            None => vp,
                            Some(next) if is_wh_adverbial_clause(self.tree, next) => inner,
                            Some(_) => fc,
                        };
                        return self.place_after(wh, anchor);
                    }
                    Some(Phrase::Advp) => return self.place_after(wh, fc),
                    _ => {}
                },
                Some(_) => {}
            }
        }

        if self.is_how_adverbial(wh) {
            self.prefix_by(wh)?;
        }
        self.place_after(wh, vp)
    }

    /// For `VB* PP`: a bare particle-like `(PP (IN x))` puts the answer after
    /// the whole VP; `(PP (IN x) NP|ADJP)` puts it right after the verb.
    fn prepositional_anchor(&self, pp: NodeId, verb: NodeId, vp: NodeId) -> Option<NodeId> {
        let prep = self
            .tree
            .first_child(pp)
            .filter(|&id| self.tree.is_tag(id, PosTag::In))?;
        match self.tree.next_sibling(prep) {
            None => Some(vp),
            Some(object)
                if self.tree.next_sibling(object).is_none()
                    && matches!(self.tree.phrase(object), Some(Phrase::Np | Phrase::Adjp)) =>
            {
                Some(verb)
            }
            Some(_) => None,
        }
    }

    fn is_how_adverbial(&self, wh: NodeId) -> bool {
        self.tree.is_phrase(wh, Phrase::Whadvp) && self.opens_with("how")
    }

    fn place_first(&mut self, wh: NodeId, clause: NodeId) -> RewriteResult<()> {
        self.tree.insert_first_child(wh, clause)?;
        Ok(())
    }

    fn place_after(&mut self, wh: NodeId, anchor: NodeId) -> RewriteResult<()> {
        self.tree.insert_after(wh, anchor)?;
        Ok(())
    }
}
