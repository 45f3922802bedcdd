//! Server-rendered upload page.
//!
//! The page posts the upload form back to `/` and receives the summary embedded in the
//! response. Keyword filtering then happens entirely in the browser against that embedded
//! copy, so the server keeps no per-user state between requests.

use crate::highlight::escape_html;
use crate::processing::{SummaryOutcome, WordBudget};

/// Everything needed to render the page for one response.
#[derive(Debug, Clone)]
pub struct PageView {
    /// Value pre-filled in the `max_words` input.
    pub max_words: WordBudget,
    /// Largest value the `max_words` input accepts.
    pub max_words_limit: WordBudget,
    /// Summary to display, when one was produced.
    pub outcome: Option<SummaryOutcome>,
    /// Error banner to display, when the upload failed.
    pub error: Option<String>,
}

const STYLE: &str = r#"
body { background: linear-gradient(135deg, #ece9e6 0%, #ffffff 100%); font-family: Arial, sans-serif; color: #333; }
.container { max-width: 860px; margin: 50px auto; border-radius: 10px; box-shadow: 0 4px 20px rgba(0, 0, 0, 0.1); padding: 30px; background: rgba(255, 255, 255, 0.9); }
h1 { font-size: 2.5rem; color: #007bff; text-align: center; }
label { font-weight: bold; display: block; margin-top: 12px; }
input[type="text"], input[type="number"] { height: 40px; border: 2px solid #007bff; border-radius: 5px; padding: 0 8px; }
.btn { background: #007bff; color: white; border: none; border-radius: 5px; padding: 10px 16px; cursor: pointer; }
.btn:hover { background: #0056b3; }
.actions { display: flex; gap: 8px; margin-top: 20px; }
.actions input { flex: 1; }
.alert { padding: 12px; border-radius: 5px; margin-top: 20px; }
.alert-success { background: #d4edda; color: #155724; }
.alert-error { background: #f8d7da; color: #721c24; }
#summaryText { min-height: 150px; overflow-y: auto; padding: 10px; background: #fff; border: 2px solid #007bff; border-radius: 5px; white-space: pre-wrap; }
.highlight { background-color: yellow; }
.no-results { color: red; display: none; }
"#;

const SCRIPT: &str = r#"
(function () {
  const data = document.getElementById('summaryData');
  if (!data) { return; }
  const original = JSON.parse(data.textContent);
  const target = document.getElementById('summaryText');
  const noResults = document.getElementById('noResults');
  const escapeHtml = (text) => text.replace(/[&<>"']/g, (ch) => ({
    '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
  })[ch]);
  const escapeRegex = (text) => text.replace(/[.*+?^${}()|[\]\\]/g, '\\$&');
  document.getElementById('filterButton').onclick = function () {
    const term = document.getElementById('searchInput').value.trim();
    if (!term) {
      target.innerHTML = escapeHtml(original);
      noResults.style.display = 'none';
      return;
    }
    const pattern = new RegExp(escapeRegex(term), 'gi');
    let html = '';
    let cursor = 0;
    let matches = 0;
    for (const found of original.matchAll(pattern)) {
      html += escapeHtml(original.slice(cursor, found.index));
      html += '<span class="highlight">' + escapeHtml(found[0]) + '</span>';
      cursor = found.index + found[0].length;
      matches += 1;
    }
    html += escapeHtml(original.slice(cursor));
    target.innerHTML = html;
    noResults.style.display = matches > 0 ? 'none' : 'block';
  };
  document.getElementById('copyButton').onclick = function () {
    navigator.clipboard.writeText(original).then(() => alert('Summary copied to clipboard!'));
  };
})();
"#;

/// Encode a string as a JSON literal that is safe inside a `<script>` element.
fn script_json(text: &str) -> String {
    serde_json::Value::from(text)
        .to_string()
        .replace('<', "\\u003c")
}

/// Render the full HTML document.
pub fn render_page(view: &PageView) -> String {
    let mut body = String::new();

    if let Some(error) = &view.error {
        body.push_str(&format!(
            r#"<div class="alert alert-error" role="alert">{}</div>"#,
            escape_html(error)
        ));
    }

    if let Some(outcome) = &view.outcome {
        body.push_str(&format!(
            r#"<div class="alert alert-success" role="alert">Summary generated successfully!</div>
<h2>Summary (up to {max_words} words)</h2>
<div id="summaryText">{summary}</div>
<button id="copyButton" class="btn" type="button">Copy summary</button>
<script type="application/json" id="summaryData">{data}</script>"#,
            max_words = outcome.max_words,
            summary = escape_html(&outcome.summary),
            data = script_json(&outcome.summary),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>PDF Summary</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
<h1>PDF Summary</h1>
<form method="POST" action="/" enctype="multipart/form-data">
<label for="pdf_file">Choose a PDF file:</label>
<input type="file" name="pdf_file" id="pdf_file" accept=".pdf,application/pdf" required>
<label for="max_words">Maximum words in the summary:</label>
<input type="number" name="max_words" id="max_words" min="1" max="{limit}" value="{max_words}" required>
<div class="actions">
<button type="submit" class="btn">Summarize</button>
<input type="text" id="searchInput" placeholder="Search the summary">
<button type="button" class="btn" id="filterButton">Filter</button>
</div>
<label id="noResults" class="no-results">No matches found.</label>
</form>
{body}
</div>
<script>{SCRIPT}</script>
</body>
</html>
"#,
        limit = view.max_words_limit,
        max_words = view.max_words,
    )
}
