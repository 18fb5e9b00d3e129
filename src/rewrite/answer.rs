//! WH-phrase → answer marker.
//!
//! The WH constituent keeps its label (later rules branch on it) but its
//! contents are replaced by an `(A ...)` marker node:
//!
//! | WH-phrase            | becomes                  |
//! |----------------------|--------------------------|
//! | `how old`            | `<marker> years old`     |
//! | `why`                | `because <marker>`       |
//! | WHADJP / WHADVP      | `<marker>`               |
//! | `how many` + noun    | `<marker>` + noun        |
//! | `what color` + noun  | `<marker>` + noun        |
//! | other WHNP / WHPP    | `<marker>` (keeping the preposition of a WHPP) |

use super::Rewriter;
use crate::error::{RewriteError, RewriteResult};
use crate::tree::{NodeId, Phrase};

const COLOR_PREFIX: &str = "(WHNP(WDT what)(NN color)(NN";

impl Rewriter<'_> {
    pub(super) fn convert_wh(&mut self, wh: NodeId) -> RewriteResult<()> {
        let text = self.tree.phrase_text(wh);

        if text == "how old" {
            let answer = self.answer_node("", "years old");
            self.tree.replace_children(wh, answer)?;
            return Ok(());
        }
        if text == "why" {
            let answer = self.answer_node("because", "");
            self.tree.replace_children(wh, answer)?;
            return Ok(());
        }
        if matches!(
            self.tree.phrase(wh),
            Some(Phrase::Whadjp | Phrase::Whadvp)
        ) {
            let answer = self.answer_node("", "");
            self.tree.replace_children(wh, answer)?;
            return Ok(());
        }

        let Some(mut target) = self.noun_phrase_of(wh) else {
            return Err(RewriteError::UnknownWhStructure {
                label: self.tree.kind(wh).token().to_string(),
                text,
            });
        };

        // Descend through stacked WHNPs starting from the WH's own first child.
        let mut first = self.tree.first_child(wh);
        while let Some(id) = first.filter(|&id| self.tree.is_phrase(id, Phrase::Whnp)) {
            target = id;
            first = self.tree.first_child(id);
        }

        if let Some(quantifier) = first.filter(|&id| self.tree.is_phrase(id, Phrase::Whadjp)) {
            let answer = self.answer_node("", "");
            self.tree.replace_children(quantifier, answer)?;
        } else if self.tree.bracket_text(target).starts_with(COLOR_PREFIX) {
            let rest = self.tree.phrase_text(target).replacen("what color ", "", 1);
            let answer = self.answer_node("", &rest);
            self.tree.replace_children(target, answer)?;
        } else {
            let answer = self.answer_node("", "");
            self.tree.replace_children(target, answer)?;
        }
        Ok(())
    }

    /// The WHNP to rewrite: the WH itself, or the object of a WHPP.
    fn noun_phrase_of(&self, wh: NodeId) -> Option<NodeId> {
        match self.tree.phrase(wh)? {
            Phrase::Whnp => Some(wh),
            Phrase::Whpp => self
                .tree
                .children(wh)
                .get(1)
                .copied()
                .filter(|&id| self.tree.is_phrase(id, Phrase::Whnp)),
            _ => None,
        }
    }
}
