use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing summarization activity.
#[derive(Default)]
pub struct SummaryMetrics {
    documents_summarized: AtomicU64,
    texts_summarized: AtomicU64,
    extraction_failures: AtomicU64,
    words_emitted: AtomicU64,
    last_word_budget: AtomicU64,
}

impl SummaryMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a summary produced from an uploaded document.
    pub fn record_document(&self, words: u64, budget: u64) {
        self.documents_summarized.fetch_add(1, Ordering::Relaxed);
        self.record_words(words, budget);
    }

    /// Record a summary produced from raw text submitted directly.
    pub fn record_text(&self, words: u64, budget: u64) {
        self.texts_summarized.fetch_add(1, Ordering::Relaxed);
        self.record_words(words, budget);
    }

    /// Record an upload whose text could not be extracted.
    pub fn record_extraction_failure(&self) {
        self.extraction_failures.fetch_add(1, Ordering::Relaxed);
    }

    fn record_words(&self, words: u64, budget: u64) {
        self.words_emitted.fetch_add(words, Ordering::Relaxed);
        self.last_word_budget.store(budget, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let last_word_budget = self.last_word_budget.load(Ordering::Relaxed);
        MetricsSnapshot {
            documents_summarized: self.documents_summarized.load(Ordering::Relaxed),
            texts_summarized: self.texts_summarized.load(Ordering::Relaxed),
            extraction_failures: self.extraction_failures.load(Ordering::Relaxed),
            words_emitted: self.words_emitted.load(Ordering::Relaxed),
            last_word_budget: (last_word_budget > 0).then_some(last_word_budget),
        }
    }
}

/// Immutable view of summarization counters used for reporting.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of uploaded documents summarized since startup.
    pub documents_summarized: u64,
    /// Number of raw text submissions summarized since startup.
    pub texts_summarized: u64,
    /// Uploads rejected because no text could be extracted.
    pub extraction_failures: u64,
    /// Total words placed into summaries.
    pub words_emitted: u64,
    /// Word budget applied to the most recent summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_word_budget: Option<u64>,
}
