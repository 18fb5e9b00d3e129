//! Parallel conversion of many independent questions.
//!
//! Each input line holds one bracket tree. Lines are converted on the rayon
//! pool. A failure is recorded in that line's [`BatchOutcome`] and never
//! affects the others.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::ClozeConfig;

/// The result of converting one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// The question text, or the raw line when it did not parse.
    pub question: String,
    pub statement: Option<String>,
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.statement.is_some()
    }
}

/// Convert every non-blank line, preserving input order.
pub fn convert_lines<S>(lines: &[S], config: &ClozeConfig) -> Vec<BatchOutcome>
where
    S: AsRef<str> + Sync,
{
    let outcomes: Vec<BatchOutcome> = lines
        .par_iter()
        .filter_map(|line| {
            let line: &str = line.as_ref();
            (!line.trim().is_empty()).then(|| convert_line(line, config))
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    tracing::debug!(total = outcomes.len(), failed, "batch finished");
    outcomes
}

fn convert_line(line: &str, config: &ClozeConfig) -> BatchOutcome {
    let mut tree = match crate::tree::Tree::parse_with_depth(line, config.max_depth) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::warn!(line, error = %e, "skipping unparsable line");
            return BatchOutcome {
                question: line.trim().to_string(),
                statement: None,
                error: Some(e.to_string()),
            };
        }
    };

    let question = tree.question().to_string();
    match crate::rewrite::adjust_order(&mut tree, &config.rewrite_options()) {
        Ok(statement) => BatchOutcome {
            question,
            statement: Some(statement),
            error: None,
        },
        Err(e) => {
            tracing::warn!(question = %question, error = %e, "question not converted");
            BatchOutcome {
                question,
                statement: None,
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IS_HE_HAPPY: &str = "(ROOT (SQ (VBZ Is) (NP (PRP he)) (ADJP (JJ happy)) (. ?)))";
    const WHO_WROTE: &str =
        "(ROOT (SBARQ (WHNP (WP Who)) (SQ (VP (VBD wrote) (NP (DT the) (NN book)))) (. ?)))";

    #[test]
    fn order_is_preserved() {
        let lines = vec![IS_HE_HAPPY, WHO_WROTE, IS_HE_HAPPY];
        let out = convert_lines(&lines, &ClozeConfig::default());
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].statement.as_deref(), Some("he is **blank** happy"));
        assert_eq!(out[1].statement.as_deref(), Some("**blank** wrote the book"));
        assert_eq!(out[1].question, "who wrote the book ?");
        assert_eq!(out[2], out[0]);
    }

    #[test]
    fn failures_are_isolated() {
        let lines = [
            WHO_WROTE.to_string(),
            "(ROOT (SQ".to_string(),
            "(ROOT (NP (NN cat) (. .)))".to_string(),
            IS_HE_HAPPY.to_string(),
        ];
        let out = convert_lines(&lines, &ClozeConfig::default());
        assert_eq!(out.len(), 4);
        assert!(out[0].is_ok());
        assert!(!out[1].is_ok());
        assert_eq!(out[1].question, "(ROOT (SQ");
        assert!(out[1].error.as_deref().unwrap().contains("malformed"));
        assert!(!out[2].is_ok());
        assert!(out[2].error.as_deref().unwrap().contains("NP"));
        assert!(out[3].is_ok());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let lines = ["", "   ", IS_HE_HAPPY, "\t"];
        let out = convert_lines(&lines, &ClozeConfig::default());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn config_marker_is_applied() {
        let config = ClozeConfig {
            marker: "<?>".into(),
            ..Default::default()
        };
        let out = convert_lines(&[IS_HE_HAPPY], &config);
        assert_eq!(out[0].statement.as_deref(), Some("he is <?> happy"));
    }

    #[test]
    fn outcome_serializes_to_json() {
        let out = convert_lines(&[IS_HE_HAPPY], &ClozeConfig::default());
        let json = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(json["statement"], "he is **blank** happy");
        assert!(json["error"].is_null());
    }
}
