//! Rich diagnostic error types for qcloze.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source spans so users know exactly what
//! went wrong with a given parse tree.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::config::ConfigError;
use crate::tree::NodeId;

/// Top-level error type for qcloze.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum ClozeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Rewrite(#[from] RewriteError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Tree errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum TreeError {
    #[error("malformed tree: {reason}")]
    #[diagnostic(
        code(qcloze::tree::malformed),
        help(
            "Input must be Penn Treebank bracket notation: `(LABEL child ...)` where \
             every child is another bracketed group or a bare word. Check that the \
             parentheses are balanced and that every `(` is followed by a label."
        )
    )]
    Malformed {
        reason: String,
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("malformed tree: input is empty")]
    #[diagnostic(
        code(qcloze::tree::empty),
        help("Provide the parser output for one question, e.g. `(ROOT (SQ ...))`.")
    )]
    Empty,

    #[error("tree nesting exceeds the limit of {limit} levels")]
    #[diagnostic(
        code(qcloze::tree::too_deep),
        help(
            "Question parses are normally a few dozen levels deep. Raise `max_depth` \
             in the configuration if this input is legitimate."
        )
    )]
    TooDeep { limit: usize },

    #[error("node {node} is not attached to a parent")]
    #[diagnostic(
        code(qcloze::tree::not_attached),
        help(
            "Detach and insert-after operations need the node to sit in a child list. \
             This is an internal rule error; please report the input that caused it."
        )
    )]
    NotAttached { node: NodeId },

    #[error("node {node} is already attached and cannot be inserted again")]
    #[diagnostic(
        code(qcloze::tree::already_attached),
        help(
            "A node must be detached before it is inserted elsewhere. \
             This is an internal rule error; please report the input that caused it."
        )
    )]
    AlreadyAttached { node: NodeId },

    #[error("inserting node {node} there would make it its own ancestor")]
    #[diagnostic(
        code(qcloze::tree::would_cycle),
        help(
            "The insertion anchor lies inside the subtree being inserted. \
             This is an internal rule error; please report the input that caused it."
        )
    )]
    WouldCycle { node: NodeId },
}

/// Result type for tree construction and editing.
pub type TreeResult<T> = std::result::Result<T, TreeError>;

// ---------------------------------------------------------------------------
// Rewrite errors
// ---------------------------------------------------------------------------

/// The rule set that was running when a clause failed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseStage {
    /// Un-inverting a yes/no question.
    YesNo,
    /// Restoring declarative order inside a WH-question.
    Uninvert,
    /// Placing the converted WH-phrase back into the clause.
    Reinsert,
}

impl std::fmt::Display for ClauseStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClauseStage::YesNo => write!(f, "yes/no rewrite"),
            ClauseStage::Uninvert => write!(f, "clause un-inversion"),
            ClauseStage::Reinsert => write!(f, "answer reinsertion"),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum RewriteError {
    #[error("unknown question structure: top clause is {label}")]
    #[diagnostic(
        code(qcloze::rewrite::unknown_question),
        help(
            "Only FRAG (\"how many ...\"), SQ, SBARQ and SBAR (\"how many ...\") top \
             clauses are rewritten. Other shapes are rejected rather than approximated."
        )
    )]
    UnknownQuestionStructure { label: String },

    #[error("unknown clause structure during {stage}: [{shape}]")]
    #[diagnostic(
        code(qcloze::rewrite::unknown_clause),
        help(
            "The inverted clause did not match any subject/verb/complement pattern. \
             The bracketed list shows the clause's constituent labels in order."
        )
    )]
    UnknownSqStructure { stage: ClauseStage, shape: String },

    #[error("unknown WH-phrase structure: {label} \"{text}\"")]
    #[diagnostic(
        code(qcloze::rewrite::unknown_wh),
        help(
            "The WH-phrase must be WHADJP, WHADVP, WHNP, or a WHPP whose second child \
             is a WHNP."
        )
    )]
    UnknownWhStructure { label: String, text: String },

    #[error("precondition violated: {message}")]
    #[diagnostic(
        code(qcloze::rewrite::precondition),
        help(
            "The parse tree lacks something every rewritable question has, \
             such as the terminal punctuation constituent `(. ?)`."
        )
    )]
    PreconditionViolation { message: String },

    #[error("tree has already been rewritten")]
    #[diagnostic(
        code(qcloze::rewrite::already_rewritten),
        help("Rewriting is destructive and single-use. Parse the input again to get a fresh tree.")
    )]
    AlreadyRewritten,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Tree(#[from] TreeError),
}

/// Result type for rewrite operations.
pub type RewriteResult<T> = std::result::Result<T, RewriteError>;

impl RewriteError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        RewriteError::PreconditionViolation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_error_converts_into_top_level() {
        let err: ClozeError = TreeError::Empty.into();
        assert!(matches!(err, ClozeError::Tree(TreeError::Empty)));
    }

    #[test]
    fn clause_error_names_stage_and_shape() {
        let err = RewriteError::UnknownSqStructure {
            stage: ClauseStage::Reinsert,
            shape: "NP VBZ SBAR".into(),
        };
        assert_eq!(
            err.to_string(),
            "unknown clause structure during answer reinsertion: [NP VBZ SBAR]"
        );
    }

    #[test]
    fn diagnostic_codes_are_namespaced() {
        let err = RewriteError::AlreadyRewritten;
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("qcloze::rewrite::already_rewritten"));
    }
}
