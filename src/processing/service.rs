//! Summary service coordinating extraction, normalization, and summarization.

use crate::{
    config::Config,
    extraction::{TextExtractor, get_text_extractor},
    metrics::{MetricsSnapshot, SummaryMetrics},
    processing::{
        sanitize::normalize_whitespace,
        summarize::summarize,
        types::{BudgetPolicy, ProcessingError, SummaryOutcome, WordBudget},
    },
};
use async_trait::async_trait;
use std::sync::Arc;

/// Runs the extract → normalize → summarize pipeline for each request.
///
/// Every call is independent: nothing about a request survives it except the metrics counters.
/// Construct the service once near process start and share it through an `Arc`.
pub struct SummaryService {
    extractor: Box<dyn TextExtractor + Send + Sync>,
    policy: BudgetPolicy,
    metrics: Arc<SummaryMetrics>,
}

/// Abstraction over the summary pipeline used by external surfaces (HTTP, CLI).
#[async_trait]
pub trait SummaryApi: Send + Sync {
    /// Extract text from an uploaded document and summarize it.
    async fn summarize_document(
        &self,
        bytes: Vec<u8>,
        budget: WordBudget,
    ) -> Result<SummaryOutcome, ProcessingError>;

    /// Summarize raw text that was already extracted.
    fn summarize_text(&self, raw: &str, budget: WordBudget) -> SummaryOutcome;

    /// Policy used to turn form input into a word budget.
    fn budget_policy(&self) -> BudgetPolicy;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl SummaryService {
    /// Build a service from the loaded configuration using the default PDF extractor.
    pub fn new(config: &Config) -> Self {
        let policy = BudgetPolicy::new(
            config.summary_default_max_words,
            config.summary_max_words_limit,
        );
        tracing::info!(
            default_max_words = policy.default.get(),
            max_words_limit = policy.limit.get(),
            "Initializing summary service"
        );
        Self::with_extractor(get_text_extractor(), policy)
    }

    /// Build a service around a specific extractor.
    pub fn with_extractor(
        extractor: Box<dyn TextExtractor + Send + Sync>,
        policy: BudgetPolicy,
    ) -> Self {
        Self {
            extractor,
            policy,
            metrics: Arc::new(SummaryMetrics::new()),
        }
    }

    /// Extract text from an uploaded document and summarize it.
    pub async fn summarize_document(
        &self,
        bytes: Vec<u8>,
        budget: WordBudget,
    ) -> Result<SummaryOutcome, ProcessingError> {
        tracing::info!(bytes = bytes.len(), budget = budget.get(), "Summarizing document");
        let raw = match self.extractor.extract_text(bytes).await {
            Ok(raw) => raw,
            Err(error) => {
                self.metrics.record_extraction_failure();
                tracing::warn!(error = %error, "Text extraction failed");
                return Err(error.into());
            }
        };
        let outcome = build_outcome(&raw, budget);
        self.metrics
            .record_document(outcome.word_count as u64, budget.get() as u64);
        tracing::info!(
            word_count = outcome.word_count,
            sentences = outcome.sentences_used,
            truncated = outcome.truncated,
            "Document summarized"
        );
        Ok(outcome)
    }

    /// Summarize raw text that was already extracted.
    pub fn summarize_text(&self, raw: &str, budget: WordBudget) -> SummaryOutcome {
        let outcome = build_outcome(raw, budget);
        self.metrics
            .record_text(outcome.word_count as u64, budget.get() as u64);
        tracing::debug!(
            chars = raw.len(),
            budget = budget.get(),
            word_count = outcome.word_count,
            "Text summarized"
        );
        outcome
    }

    /// Return the current metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Normalize raw text and summarize it within `budget`.
pub fn build_outcome(raw: &str, budget: WordBudget) -> SummaryOutcome {
    let normalized = normalize_whitespace(raw);
    let summary = summarize(&normalized, budget);
    SummaryOutcome::new(&summary, budget)
}

#[async_trait]
impl SummaryApi for SummaryService {
    async fn summarize_document(
        &self,
        bytes: Vec<u8>,
        budget: WordBudget,
    ) -> Result<SummaryOutcome, ProcessingError> {
        SummaryService::summarize_document(self, bytes, budget).await
    }

    fn summarize_text(&self, raw: &str, budget: WordBudget) -> SummaryOutcome {
        SummaryService::summarize_text(self, raw, budget)
    }

    fn budget_policy(&self) -> BudgetPolicy {
        self.policy
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        SummaryService::metrics_snapshot(self)
    }
}
