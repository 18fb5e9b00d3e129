//! End-to-end conversion tests for qcloze.
//!
//! Each case feeds the parser output for one question through the public
//! API and checks the resulting cloze statement.

use qcloze::batch::convert_lines;
use qcloze::config::{ClozeConfig, ConfigError};
use qcloze::error::{ClozeError, RewriteError, TreeError};
use qcloze::rewrite::{RewriteOptions, adjust_order};
use qcloze::tree::Tree;

const MARKER: &str = "**blank**";

/// (parse, expected statement)
const CASES: &[(&str, &str)] = &[
    (
        "(ROOT (SQ (VBZ Is) (NP (PRP he)) (ADJP (JJ happy)) (. ?)))",
        "he is **blank** happy",
    ),
    (
        "(ROOT (SQ (VBP Do) (NP (PRP you)) (VP (VB like) (NP (NNS cats))) (. ?)))",
        "you **blank** like cats",
    ),
    (
        "(ROOT (FRAG (WHNP (WRB How) (JJ many)) (NP (NNS apples)) (. ?)))",
        "there are **blank** apples",
    ),
    (
        "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (NP (DT the) (NN capital)) \
         (PP (IN of) (NP (NNP France))))) (. ?)))",
        "the capital of france is **blank**",
    ),
    (
        "(ROOT (SBARQ (WHADVP (WRB Why)) (SQ (VBZ is) (NP (DT the) (NN sky)) (ADJP (JJ blue))) (. ?)))",
        "the sky is blue because **blank**",
    ),
    (
        "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ does) (NP (DT the) (NN cat)) (VP (VB eat))) (. ?)))",
        "the cat eat **blank**",
    ),
    (
        "(ROOT (SBARQ (WHADJP (WRB How) (JJ old)) (SQ (VBZ is) (NP (DT the) (NN tree))) (. ?)))",
        "the tree is **blank** years old",
    ),
    (
        "(ROOT (SBARQ (WHNP (WDT What) (NN color) (NN shirt)) (SQ (VBZ is) (NP (PRP he)) \
         (VP (VBG wearing))) (. ?)))",
        "he is wearing **blank** shirt",
    ),
    (
        "(ROOT (SBARQ (WHNP (WHADJP (WRB How) (JJ many)) (NNS people)) \
         (SQ (VP (VBP live) (ADVP (RB here)))) (. ?)))",
        "**blank** people live here",
    ),
    (
        "(ROOT (SBARQ (WHADVP (WRB Why)) (SQ (MD ca) (RB n't) (NP (PRP he)) (VP (VB swim))) (. ?)))",
        "he can not swim because **blank**",
    ),
    (
        "(ROOT (SBARQ (WHPP (IN In) (WHNP (WDT which) (NN city))) (SQ (VBZ is) \
         (NP (DT the) (NN museum))) (. ?)))",
        "the museum is in **blank**",
    ),
    (
        "(ROOT (SBARQ (WHADVP (WRB How)) (SQ (VBZ is) (NP (NN paper)) (VP (VBN made))) (. ?)))",
        "paper is made by **blank**",
    ),
    (
        "(ROOT (SBARQ (WHNP (WP Who)) (SQ (VP (VBD wrote) (NP (DT the) (NN book)))) (. ?)))",
        "**blank** wrote the book",
    ),
    (
        "(ROOT (SBARQ (WHADVP (WRB Where)) (SQ (VBZ does) (NP (PRP she)) (VP (VB live))) (. ?)))",
        "she live **blank**",
    ),
    (
        "(ROOT (SBARQ (WHADVP (WRB When)) (SQ (VBZ is) (NP (NP (DT the) (NN concert)) \
         (PP (IN in) (NP (DT the) (NN park))))) (. ?)))",
        "the concert is in the park **blank**",
    ),
    (
        "(ROOT (SBARQ (WHPP (IN For) (WHNP (WP what))) (SQ (NP (PRP he)) (VP (VBD worked))) (. ?)))",
        "he worked for **blank**",
    ),
    (
        "(ROOT (SBAR (WHADJP (WRB How) (JJ many)) (S (NP (NNS cats)) \
         (VP (VBP are) (ADJP (JJ black)))) (. ?)))",
        "**blank** cats are black",
    ),
    (
        "(ROOT (SBARQ (WHADVP (WRB How)) (SQ (VBP do) (NP (PRP you)) (VP (VB know) \
         (SBAR (IN that) (S (NP (PRP it)) (VP (VBZ works)))))) (. ?)))",
        "you know that it works by **blank**",
    ),
    (
        "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBD did) (NP (PRP he)) (VP (VB say) \
         (SBAR (IN that) (S (NP (PRP it)) (VP (VBD rained)))))) (. ?)))",
        "he say **blank** that it rained",
    ),
    (
        "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBD did) (NP (PRP he)) (VP (VB give) (PRT (RP up)))) (. ?)))",
        "he give up **blank**",
    ),
    (
        "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBD did) (NP (PRP he)) (VP (VB eat) \
         (ADVP (NN yesterday)))) (. ?)))",
        "he eat **blank** yesterday",
    ),
    (
        "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBP do) (NP (PRP you)) (VP (VB want) \
         (S (VP (TO to) (VP (VB know) (SBAR (WHADVP (WRB where)) (S (NP (PRP it)) \
         (VP (VBZ is))))))))) (. ?)))",
        "you want to know **blank** where it is",
    ),
    (
        "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (PRP he)) (S (VP (TO to) (VP (VB do))))) (. ?)))",
        "he is to do **blank**",
    ),
    (
        "(ROOT (SBARQ (WHADVP (WRB Where)) (SQ (VBZ is) (NP (PRP he)) (S (VP (TO to) (VP (VB go))))) (. ?)))",
        "he is **blank** to go",
    ),
    (
        "(ROOT (SBARQ (WHADVP (WRB When)) (SQ (VBZ is) (NP (PRP he)) (NP (DT a) (NN doctor))) (. ?)))",
        "he is a doctor **blank**",
    ),
    (
        "(ROOT (SBARQ (WHADVP (WRB When)) (SQ (VBZ is) (NP (NP (NN something)) (ADJP (JJ red)))) (. ?)))",
        "something is red **blank**",
    ),
    (
        "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (NP (DT the) (NN time)) \
         (SBAR (WHADVP (WRB when)) (S (NP (PRP he)) (VP (VBZ sleeps)))))) (. ?)))",
        "the time is **blank** when he sleeps",
    ),
    (
        "(ROOT (SBARQ (WHNP (WP What)) (SQ (VBZ is) (NP (NP (DT the) (NN thing)) (PP (IN about)))) (. ?)))",
        "the thing is about **blank**",
    ),
];

#[test]
fn scenarios_convert() {
    let config = ClozeConfig::default();
    for (parse, expected) in CASES {
        let statement = qcloze::convert(parse, &config)
            .unwrap_or_else(|e| panic!("failed on {parse}: {e}"));
        assert_eq!(&statement, expected, "input: {parse}");
    }
}

#[test]
fn every_statement_has_exactly_one_marker() {
    let config = ClozeConfig::default();
    for (parse, _) in CASES {
        let statement = qcloze::convert(parse, &config).unwrap();
        assert_eq!(statement.matches(MARKER).count(), 1, "statement: {statement}");
    }
}

#[test]
fn multiline_input_is_accepted() {
    let parse = "(ROOT\n  (SQ (VBZ Is)\n    (NP (PRP he))\n    (ADJP (JJ happy))\n    (. ?)))\n";
    let statement = qcloze::convert(parse, &ClozeConfig::default()).unwrap();
    assert_eq!(statement, "he is **blank** happy");
}

#[test]
fn words_match_leaves() {
    let tree = Tree::parse(CASES[3].0).unwrap();
    assert_eq!(
        tree.words(),
        ["what", "is", "the", "capital", "of", "france", "?"]
    );
    assert_eq!(tree.question(), "what is the capital of france ?");
    let leaves: Vec<&str> = tree.words_under(tree.root());
    assert_eq!(leaves, tree.words());
}

#[test]
fn traverse_lists_every_token() {
    let tree = Tree::parse("(ROOT (SQ (VBZ Is) (NP (PRP he)) (. ?)))").unwrap();
    assert_eq!(
        tree.traverse(),
        ["ROOT", "SQ", "VBZ", "is", "NP", "PRP", "he", ".", "?"]
    );
}

#[test]
fn malformed_input_is_reported() {
    let err = qcloze::convert("(ROOT (SQ (VBZ Is)", &ClozeConfig::default()).unwrap_err();
    assert!(matches!(err, ClozeError::Tree(TreeError::Malformed { .. })));

    let err = qcloze::convert("", &ClozeConfig::default()).unwrap_err();
    assert!(matches!(err, ClozeError::Tree(TreeError::Empty)));
}

#[test]
fn nesting_limit_comes_from_config() {
    let config = ClozeConfig {
        max_depth: 3,
        ..Default::default()
    };
    let err = qcloze::convert(CASES[3].0, &config).unwrap_err();
    assert!(matches!(err, ClozeError::Tree(TreeError::TooDeep { limit: 3 })));
}

#[test]
fn unknown_wh_structure_is_reported() {
    let parse = "(ROOT (SBARQ (WHPP (IN In) (NP (NN town))) (SQ (VBZ is) (NP (PRP it))) (. ?)))";
    let err = qcloze::convert(parse, &ClozeConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        ClozeError::Rewrite(RewriteError::UnknownWhStructure { .. })
    ));
}

#[test]
fn tree_is_single_use() {
    let mut tree = Tree::parse(CASES[0].0).unwrap();
    let options = RewriteOptions::default();
    assert_eq!(adjust_order(&mut tree, &options).unwrap(), CASES[0].1);
    assert!(matches!(
        adjust_order(&mut tree, &options),
        Err(RewriteError::AlreadyRewritten)
    ));
}

#[test]
fn fragment_shortcut_consumes_tree() {
    let mut tree = Tree::parse(CASES[2].0).unwrap();
    let options = RewriteOptions::default();
    assert!(adjust_order(&mut tree, &options).is_ok());
    assert!(adjust_order(&mut tree, &options).is_err());
}

#[test]
fn batch_matches_single_conversions() {
    let config = ClozeConfig::default();
    let lines: Vec<&str> = CASES.iter().map(|(parse, _)| *parse).collect();
    let outcomes = convert_lines(&lines, &config);
    assert_eq!(outcomes.len(), CASES.len());
    for (outcome, (_, expected)) in outcomes.iter().zip(CASES) {
        assert_eq!(outcome.statement.as_deref(), Some(*expected));
        assert!(outcome.error.is_none());
    }
}

#[test]
fn config_file_drives_conversion() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("qcloze.toml");
    std::fs::write(&path, "marker = \"____\"\ndiagnostics = true\n").unwrap();

    let config = ClozeConfig::load(&path).unwrap();
    let statement = qcloze::convert(CASES[12].0, &config).unwrap();
    assert_eq!(statement, "____ wrote the book");

    let err = qcloze::convert("(ROOT (NP (NN cat) (. .)))", &config).unwrap_err();
    assert!(matches!(
        err,
        ClozeError::Rewrite(RewriteError::UnknownQuestionStructure { .. })
    ));
}

#[test]
fn blank_marker_never_reaches_output() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("qcloze.toml");
    std::fs::write(&path, "marker = \"\"\n").unwrap();
    assert!(matches!(
        ClozeConfig::load(&path),
        Err(ConfigError::Invalid { .. })
    ));

    let config = ClozeConfig {
        marker: String::new(),
        ..Default::default()
    };
    for parse in [CASES[2].0, CASES[12].0] {
        let err = qcloze::convert(parse, &config).unwrap_err();
        assert!(matches!(
            err,
            ClozeError::Rewrite(RewriteError::PreconditionViolation { .. })
        ));
    }
}
