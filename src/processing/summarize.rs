//! Greedy word-budgeted extractive summarization.

use super::sentences::split_sentences;
use super::types::{Summary, WordBudget};

/// Apostrophes allowed inside a word ("don't", "it’s").
const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || APOSTROPHES.contains(&ch)
}

/// Count words: maximal runs of alphanumeric characters, apostrophes allowed inside a run.
///
/// Tokens made only of apostrophes are not words.
pub fn count_words(text: &str) -> usize {
    text.split(|ch: char| !is_word_char(ch))
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .count()
}

/// Summarize normalized text by copying leading sentences until the budget would overflow.
///
/// Accumulation stops at the first sentence that does not fit; later, shorter sentences are
/// never considered. When the first sentence alone is too long the summary is empty.
pub fn summarize(text: &str, budget: WordBudget) -> Summary {
    let mut body = String::new();
    let mut word_count = 0;
    let mut sentences_used = 0;
    let mut truncated = false;

    for sentence in split_sentences(text) {
        let words = count_words(sentence);
        if word_count + words > budget.get() {
            truncated = true;
            break;
        }
        body.push_str(sentence);
        body.push(' ');
        word_count += words;
        sentences_used += 1;
    }

    let body = body.trim().to_string();
    tracing::trace!(
        budget = budget.get(),
        word_count,
        sentences_used,
        truncated,
        "Built extractive summary"
    );
    Summary {
        body,
        word_count,
        sentences_used,
        truncated,
    }
}
