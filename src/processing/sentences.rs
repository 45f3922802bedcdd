//! Sentence segmentation over normalized text.
//!
//! A sentence ends at `.`, `!` or `?` when that mark is followed by whitespace. The whitespace
//! run after the mark is swallowed by the split. Abbreviations such as "Mr." are not special
//! cased, so they end a sentence too.

/// Returns true for characters that may close a sentence.
fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Lazy iterator over the sentences of a text.
///
/// Clones are cheap and resume from the same position. Call [`split_sentences`] again to walk
/// the text from the beginning.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    remaining: Option<&'a str>,
}

/// Split `text` into sentences, preserving order.
///
/// Text without a terminal mark comes back as a single sentence, including the empty string.
pub fn split_sentences(text: &str) -> Sentences<'_> {
    Sentences {
        remaining: Some(text),
    }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.remaining?;
        match find_boundary(text) {
            Some((end, resume)) => {
                // Whitespace after the last mark leaves nothing behind to emit.
                self.remaining = (resume < text.len()).then(|| &text[resume..]);
                Some(&text[..end])
            }
            None => {
                self.remaining = None;
                Some(text)
            }
        }
    }
}

impl std::iter::FusedIterator for Sentences<'_> {}

/// Locate the first split point, returning where the sentence ends and where the next starts.
fn find_boundary(text: &str) -> Option<(usize, usize)> {
    for (index, ch) in text.char_indices() {
        if !is_terminal(ch) {
            continue;
        }
        let end = index + ch.len_utf8();
        let gap: usize = text[end..]
            .chars()
            .take_while(|next| next.is_whitespace())
            .map(char::len_utf8)
            .sum();
        if gap > 0 {
            return Some((end, end + gap));
        }
    }
    None
}
