//! Shape predicates shared by the rewrite rules.

use crate::tree::{NodeId, NodeKind, Phrase, PosTag, Tree};

/// Surface forms that mark a preterminal as an auxiliary even when the
/// parser tagged it as something else.
pub const AUX_WORDS: &[&str] = &[
    "do", "does", "can", "could", "would", "should", "might", "has", "have", "'ve", "is", "'s",
    "are", "'re", "was", "were",
];

/// Bare forms of "do", which vanish when they only support a question.
pub const DO_FORMS: &[&str] = &["do", "does", "did"];

/// Forms of "be" that make a following past participle passive.
pub const BE_FORMS: &[&str] = &["is", "are", "was", "were"];

/// Bracket-text prefix of an infinitival clause: `(S (VP (TO to) (VP (VB* ...`.
const INFINITIVAL_PREFIX: &str = "(S(VP(TO to)(VP(VB";

/// Whether `id` is a verb or modal.
///
/// A node with a non-verb tag whose word is in [`AUX_WORDS`] is relabeled
/// `VB` on the spot, so this check mutates the tree.
pub fn is_verbish(tree: &mut Tree, id: NodeId) -> bool {
    if tree.tag(id).is_some_and(PosTag::is_verb) {
        return true;
    }
    if tree.head_word(id).is_some_and(|w| AUX_WORDS.contains(&w)) {
        tree.set_kind(id, NodeKind::Tag(PosTag::Vb));
        return true;
    }
    false
}

/// Advance from `from` along its siblings past every node whose kind is in
/// `adjuncts`. Phrases and tags can be mixed, e.g. `PP`, `,` and `SBAR`.
/// Returns the first other node, if any.
pub fn skip_adjuncts(tree: &Tree, from: Option<NodeId>, adjuncts: &[NodeKind]) -> Option<NodeId> {
    let mut cursor = from;
    while let Some(id) = cursor {
        if !adjuncts.contains(tree.kind(id)) {
            break;
        }
        cursor = tree.next_sibling(id);
    }
    cursor
}

pub fn skip_advp(tree: &Tree, from: Option<NodeId>) -> Option<NodeId> {
    skip_adjuncts(tree, from, &[NodeKind::Phrase(Phrase::Advp)])
}

pub fn is_infinitival(tree: &Tree, id: NodeId) -> bool {
    tree.is_phrase(id, Phrase::S) && tree.bracket_text(id).starts_with(INFINITIVAL_PREFIX)
}

/// The verb of an infinitival clause: `S → VP → (TO, VP) → VB*`.
pub fn infinitival_verb(tree: &Tree, s: NodeId) -> Option<NodeId> {
    let vp = tree.first_child(s)?;
    let inner = *tree.children(vp).get(1)?;
    tree.first_child(inner)
}

/// Whether `id` is an `SBAR` introduced by a `WHADVP`.
pub fn is_wh_adverbial_clause(tree: &Tree, id: NodeId) -> bool {
    tree.is_phrase(id, Phrase::Sbar)
        && tree
            .first_child(id)
            .is_some_and(|c| tree.is_phrase(c, Phrase::Whadvp))
}
