//! Summarization pipeline: whitespace normalization, sentence splitting, and greedy budgeting.

pub mod sanitize;
pub mod sentences;
mod service;
pub mod summarize;
pub mod types;

pub use sanitize::normalize_whitespace;
pub use sentences::{Sentences, split_sentences};
pub use service::{SummaryApi, SummaryService, build_outcome};
pub use summarize::{count_words, summarize};
pub use types::{
    BudgetPolicy, ELLIPSIS, ProcessingError, Summary, SummaryOutcome, WordBudget,
};
