//! Helpers for normalizing extracted text and user supplied form values.

use super::types::{BudgetPolicy, WordBudget};

/// Collapse every run of whitespace into a single space.
///
/// Leading and trailing whitespace is collapsed but kept; the summarizer trims its own output.
pub fn normalize_whitespace(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut in_whitespace = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                normalized.push(' ');
            }
            in_whitespace = true;
        } else {
            normalized.push(ch);
            in_whitespace = false;
        }
    }
    normalized
}

/// Sanitize arbitrary string input by trimming whitespace and dropping empties.
pub(crate) fn sanitize_string(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

impl BudgetPolicy {
    /// Build a policy, clamping the default into `[1, limit]`.
    pub fn new(default: usize, limit: usize) -> Self {
        let limit = WordBudget::at_least_one(limit);
        let default = WordBudget::at_least_one(default.min(limit.get()));
        Self { default, limit }
    }

    /// Turn a raw `max_words` form value into a budget.
    ///
    /// Missing, blank, or non-numeric input falls back to the default. Numbers, including
    /// negative ones, are clamped into `[1, limit]`.
    pub fn resolve(&self, input: Option<&str>) -> WordBudget {
        match sanitize_string(input).map(str::parse::<i64>) {
            Some(Ok(requested)) => self.clamp(requested),
            Some(Err(_)) => {
                tracing::debug!(input = ?input, "Ignoring non-numeric max_words");
                self.default
            }
            None => self.default,
        }
    }

    /// Clamp a numeric budget into `[1, limit]`.
    pub fn clamp(&self, requested: i64) -> WordBudget {
        let limit = self.limit.get();
        let words = usize::try_from(requested.max(1)).map_or(limit, |words| words.min(limit));
        WordBudget::at_least_one(words)
    }
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_MAX_WORDS,
            crate::config::DEFAULT_MAX_WORDS_LIMIT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace_runs() {
        assert_eq!(normalize_whitespace("a\n\n\t  b"), "a b");
        assert_eq!(normalize_whitespace("one\r\ntwo\x0Cthree"), "one two three");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_whitespace("  Lorem \t ipsum.\n\nDolor   sit amet!  ");
        assert_eq!(normalize_whitespace(&once), once);
        assert_eq!(once, " Lorem ipsum. Dolor sit amet! ");
    }

    #[test]
    fn normalization_handles_empty_and_blank_input() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("\n\t "), " ");
    }

    #[test]
    fn sanitize_string_trims_and_drops_blank() {
        assert_eq!(sanitize_string(Some("  42 ")), Some("42"));
        assert_eq!(sanitize_string(Some("   ")), None);
        assert_eq!(sanitize_string(None), None);
    }

    #[test]
    fn resolve_defaults_missing_or_garbage_input() {
        let policy = BudgetPolicy::default();
        assert_eq!(policy.resolve(None).get(), 100);
        assert_eq!(policy.resolve(Some("")).get(), 100);
        assert_eq!(policy.resolve(Some("lots")).get(), 100);
        assert_eq!(policy.resolve(Some("12.5")).get(), 100);
    }

    #[test]
    fn resolve_clamps_numbers_into_range() {
        let policy = BudgetPolicy::default();
        assert_eq!(policy.resolve(Some("0")).get(), 1);
        assert_eq!(policy.resolve(Some("-20")).get(), 1);
        assert_eq!(policy.resolve(Some(" 250 ")).get(), 250);
        assert_eq!(policy.resolve(Some("9000")).get(), 500);
        assert_eq!(policy.resolve(Some("99999999999999999999")).get(), 100);
    }

    #[test]
    fn policy_keeps_default_within_limit() {
        let policy = BudgetPolicy::new(800, 300);
        assert_eq!(policy.default.get(), 300);
        assert_eq!(policy.limit.get(), 300);

        let policy = BudgetPolicy::new(0, 0);
        assert_eq!(policy.default.get(), 1);
        assert_eq!(policy.limit.get(), 1);
    }
}
