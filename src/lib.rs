// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # qcloze
//!
//! Turns constituency parses of English questions into declarative cloze
//! statements, with the answer position marked by a placeholder.
//!
//! `Is he happy?` parsed as
//! `(ROOT (SQ (VBZ Is) (NP (PRP he)) (ADJP (JJ happy)) (. ?)))` becomes
//! `he is **blank** happy`.
//!
//! ## Architecture
//!
//! - **Trees** (`tree`): Penn Treebank bracket parser into an index arena, with
//!   structural edit primitives
//! - **Rewriting** (`rewrite`): question classification, WH-answer conversion,
//!   clause un-inversion and answer reinsertion
//! - **Batch** (`batch`): rayon-parallel conversion of independent questions
//! - **Config** (`config`): TOML settings for the marker and diagnostics
//!
//! ## Library usage
//!
//! ```
//! use qcloze::config::ClozeConfig;
//!
//! let parse = "(ROOT (SBARQ (WHNP (WP Who)) (SQ (VP (VBD wrote) (NP (DT the) (NN book)))) (. ?)))";
//! let statement = qcloze::convert(parse, &ClozeConfig::default()).unwrap();
//! assert_eq!(statement, "**blank** wrote the book");
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod rewrite;
pub mod tree;

use config::ClozeConfig;
use error::ClozeError;
use tree::Tree;

/// Parse one bracket tree and rewrite it into a cloze statement.
pub fn convert(text: &str, config: &ClozeConfig) -> Result<String, ClozeError> {
    let mut tree = Tree::parse_with_depth(text, config.max_depth)?;
    let statement = rewrite::adjust_order(&mut tree, &config.rewrite_options())?;
    Ok(statement)
}
