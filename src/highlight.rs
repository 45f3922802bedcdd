//! Keyword highlighting over a finished summary.
//!
//! Highlighting is a pure function of the summary and the search term, so callers keep the
//! summary themselves and send it back when they want a different term.

use regex::RegexBuilder;
use serde::Serialize;

const MARK_OPEN: &str = r#"<span class="highlight">"#;
const MARK_CLOSE: &str = "</span>";

/// Escaped summary markup with every match of the term wrapped in a highlight span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    /// HTML-safe summary with highlight spans.
    pub html: String,
    /// Number of highlighted occurrences.
    pub matches: usize,
}

/// Escape text for use in HTML element content and quoted attributes.
///
/// Covers `&`, `<`, `>`, and both quote characters.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Highlight case-insensitive occurrences of `term` in `summary`.
///
/// The term is matched literally after trimming. Matching runs on the raw summary, so a term
/// like `amp` never lands inside an escaped entity. An empty term highlights nothing.
pub fn highlight(summary: &str, term: &str) -> Highlight {
    let term = term.trim();
    if term.is_empty() {
        return Highlight {
            html: escape_html(summary),
            matches: 0,
        };
    }

    let pattern = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(error) => {
            tracing::warn!(error = %error, "Search term rejected; skipping highlight");
            return Highlight {
                html: escape_html(summary),
                matches: 0,
            };
        }
    };

    let mut html = String::with_capacity(summary.len() + MARK_OPEN.len() + MARK_CLOSE.len());
    let mut cursor = 0;
    let mut matches = 0;
    for found in pattern.find_iter(summary) {
        html.push_str(&escape_html(&summary[cursor..found.start()]));
        html.push_str(MARK_OPEN);
        html.push_str(&escape_html(found.as_str()));
        html.push_str(MARK_CLOSE);
        cursor = found.end();
        matches += 1;
    }
    html.push_str(&escape_html(&summary[cursor..]));

    Highlight { html, matches }
}
