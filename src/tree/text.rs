//! Flattening trees back into text.

use super::{NodeId, Tree};

impl Tree {
    /// Leaf tokens under `id`, left to right.
    ///
    /// A childless node counts as a leaf whatever its kind.
    pub fn words_under(&self, id: NodeId) -> Vec<&str> {
        let mut words = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let children = self.children(id);
            if children.is_empty() {
                words.push(self.kind(id).token());
            } else {
                stack.extend(children.iter().rev());
            }
        }
        words
    }

    /// The words under `id` joined with single spaces.
    pub fn phrase_text(&self, id: NodeId) -> String {
        self.words_under(id).join(" ")
    }

    /// Compact bracket rendering: `(LABEL` on entry, ` word` per leaf, `)` on
    /// exit, with no other whitespace.
    ///
    /// `(WHNP (WDT what) (NN color))` renders as `(WHNP(WDT what)(NN color))`.
    pub fn bracket_text(&self, id: NodeId) -> String {
        enum Step {
            Enter(NodeId),
            Exit,
        }

        let mut out = String::new();
        let mut stack = vec![Step::Enter(id)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Exit => out.push(')'),
                Step::Enter(id) => {
                    let token = self.kind(id).token();
                    let children = self.children(id);
                    if children.is_empty() {
                        out.push(' ');
                        out.push_str(token);
                    } else {
                        out.push('(');
                        out.push_str(token);
                        stack.push(Step::Exit);
                        stack.extend(children.iter().rev().map(|&c| Step::Enter(c)));
                    }
                }
            }
        }
        out
    }

    /// The whole tree's words joined with single spaces, skipping emptied
    /// tokens.
    pub fn statement(&self) -> String {
        self.words_under(self.root)
            .into_iter()
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_round_trip_leaf_order() {
        let text = "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (DT the) (NN capital)) \
                    (PP (IN of) (NP (NNP France)))) (. ?)))";
        let tree = Tree::parse(text).unwrap();
        let flattened: Vec<String> = tree
            .words_under(tree.root())
            .into_iter()
            .map(str::to_string)
            .collect();
        assert_eq!(flattened, tree.words());
    }

    #[test]
    fn bracket_text_is_compact() {
        let tree = Tree::parse("(WHNP (WDT What) (NN color) (NN shirt))").unwrap();
        assert_eq!(
            tree.bracket_text(tree.root()),
            "(WHNP(WDT what)(NN color)(NN shirt))"
        );
    }

    #[test]
    fn bracket_text_nested() {
        let tree = Tree::parse("(S (VP (TO to) (VP (VB go))))").unwrap();
        assert_eq!(tree.bracket_text(tree.root()), "(S(VP(TO to)(VP(VB go))))");
    }

    #[test]
    fn statement_skips_empty_words() {
        let mut tree = Tree::parse("(S (NP (PRP she)) (VBZ does) (VP (VB swim)))").unwrap();
        let verb = tree.children(tree.root())[1];
        tree.set_head_word(verb, "");
        assert_eq!(tree.statement(), "she swim");
    }

    #[test]
    fn phrase_text_joins_subtree() {
        let tree = Tree::parse("(NP (NP (DT the) (NN cat)) (PP (IN on) (NP (NN mat))))").unwrap();
        let inner = tree.first_child(tree.root()).unwrap();
        assert_eq!(tree.phrase_text(inner), "the cat");
        assert_eq!(tree.phrase_text(tree.root()), "the cat on mat");
    }
}
