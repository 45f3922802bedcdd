//! Core data types and error definitions for the summarization pipeline.

use crate::extraction::ExtractionError;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroUsize;
use thiserror::Error;

/// Marker appended to every rendered summary.
pub const ELLIPSIS: &str = "...";

/// Errors emitted by the document summarization pipeline.
///
/// Summarizing text is total; only pulling text out of an upload can fail.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The upload could not be turned into text.
    #[error("Failed to extract text: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Maximum number of words a summary may contain. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct WordBudget(NonZeroUsize);

impl WordBudget {
    /// Build a budget, returning `None` for zero.
    pub fn new(words: usize) -> Option<Self> {
        NonZeroUsize::new(words).map(Self)
    }

    /// Build a budget, raising zero to one.
    pub fn at_least_one(words: usize) -> Self {
        Self(NonZeroUsize::new(words.max(1)).unwrap_or(NonZeroUsize::MIN))
    }

    /// Number of words allowed.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for WordBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default and maximum budgets used to sanitize user supplied `max_words` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetPolicy {
    /// Budget applied when the caller sends nothing usable.
    pub default: WordBudget,
    /// Largest budget a caller may request.
    pub limit: WordBudget,
}

/// Greedy extractive summary of a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Accumulated sentences, trimmed, without the ellipsis marker.
    pub body: String,
    /// Words in `body`.
    pub word_count: usize,
    /// Sentences copied into `body`.
    pub sentences_used: usize,
    /// Whether a sentence was left out because it would overflow the budget.
    pub truncated: bool,
}

impl Summary {
    /// Render the summary with its trailing ellipsis.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// True when no sentence fit within the budget.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            f.write_str(ELLIPSIS)
        } else {
            write!(f, "{} {ELLIPSIS}", self.body)
        }
    }
}

/// Result of summarizing one upload or text submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryOutcome {
    /// Rendered summary, always ending in `...`.
    pub summary: String,
    /// Budget that was applied.
    pub max_words: WordBudget,
    /// Words in the summary body.
    pub word_count: usize,
    /// Sentences copied into the summary.
    pub sentences_used: usize,
    /// Whether the budget cut the text short.
    pub truncated: bool,
}

impl SummaryOutcome {
    /// Package a computed summary together with the budget that produced it.
    pub fn new(summary: &Summary, max_words: WordBudget) -> Self {
        Self {
            summary: summary.render(),
            max_words,
            word_count: summary.word_count,
            sentences_used: summary.sentences_used,
            truncated: summary.truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_budget_rejects_zero() {
        assert!(WordBudget::new(0).is_none());
        assert_eq!(WordBudget::new(7).map(WordBudget::get), Some(7));
        assert_eq!(WordBudget::at_least_one(0).get(), 1);
    }

    #[test]
    fn empty_summary_renders_bare_ellipsis() {
        let summary = Summary {
            body: String::new(),
            word_count: 0,
            sentences_used: 0,
            truncated: true,
        };
        assert_eq!(summary.render(), "...");
        assert!(summary.is_empty());
    }

    #[test]
    fn summary_body_is_separated_from_ellipsis() {
        let summary = Summary {
            body: "The cat sat.".into(),
            word_count: 3,
            sentences_used: 1,
            truncated: true,
        };
        assert_eq!(summary.render(), "The cat sat. ...");
    }
}
