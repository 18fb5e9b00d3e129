//! Yes/no questions: `is he happy` → `he is <marker> happy`.
//!
//! The fronted auxiliary is removed and the marker goes right after the
//! subject, carrying the auxiliary's word unless it is a bare form of "do".

use super::Rewriter;
use super::matchers::{DO_FORMS, is_verbish};
use crate::error::{ClauseStage, RewriteError, RewriteResult};
use crate::tree::{NodeId, Phrase};

impl Rewriter<'_> {
    pub(super) fn yes_no(&mut self, clause: NodeId) -> RewriteResult<()> {
        let stage = ClauseStage::YesNo;
        let verb = self
            .tree
            .first_child(clause)
            .filter(|&verb| is_verbish(self.tree, verb))
            .ok_or_else(|| RewriteError::precondition("a yes/no question must open with a verb"))?;

        let auxiliary = self.tree.head_word(verb).unwrap_or_default().to_string();
        let answer = if DO_FORMS.contains(&auxiliary.as_str()) {
            self.answer_node("", "")
        } else {
            self.answer_node(&auxiliary, "")
        };

        let mut cursor = self.tree.next_sibling(verb);
        while let Some(id) = cursor {
            if self.tree.is_phrase(id, Phrase::Np) {
                break;
            }
            cursor = self.tree.next_sibling(id);
        }
        let subject = cursor.ok_or_else(|| self.unknown_clause(stage, clause))?;

        self.tree.insert_after(answer, subject)?;
        self.tree.detach_subtree(verb)?;
        Ok(())
    }
}
