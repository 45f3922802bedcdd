//! HTTP surface for the PDF summary service.
//!
//! The Axum router exposes:
//!
//! - `GET /` – Upload page with the summary form.
//! - `POST /` – Multipart form upload (`pdf_file`, `max_words`); renders the page with the
//!   summary embedded, or with an error banner.
//! - `POST /api/summarize` – Multipart upload returning the summary as JSON.
//! - `POST /api/summarize/text` – Summarize already extracted text sent as JSON.
//! - `POST /api/highlight` – Highlight a search term inside a summary the caller holds.
//! - `GET /metrics` – Summarization counters.
//! - `GET /commands` – Machine-readable command catalog.
//!
//! No request leaves state behind; the page and API clients keep the summary themselves.

use crate::extraction::ExtractionError;
use crate::highlight::{Highlight, highlight};
use crate::metrics::MetricsSnapshot;
use crate::page::{PageView, render_page};
use crate::processing::{BudgetPolicy, ProcessingError, SummaryApi, SummaryOutcome, WordBudget};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;

const FILE_FIELD: &str = "pdf_file";
const MAX_WORDS_FIELD: &str = "max_words";

/// Build the HTTP router exposing the summary surface.
pub fn create_router<S>(service: Arc<S>, upload_max_bytes: usize) -> Router
where
    S: SummaryApi + 'static,
{
    Router::new()
        .route("/", get(show_form::<S>).post(upload_form::<S>))
        .route("/api/summarize", post(summarize_upload::<S>))
        .route("/api/summarize/text", post(summarize_text::<S>))
        .route("/api/highlight", post(highlight_summary))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .layer(DefaultBodyLimit::max(upload_max_bytes))
        .with_state(service)
}

/// Failures surfaced to HTTP callers.
#[derive(Debug, Error)]
enum AppError {
    /// The multipart body could not be read.
    #[error("Failed to read upload: {0}")]
    Multipart(#[from] MultipartError),
    /// The form did not include a file.
    #[error("No file uploaded (expected a `pdf_file` field)")]
    MissingFile,
    /// The summary pipeline rejected the upload.
    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Multipart(error) => error.status(),
            Self::MissingFile => StatusCode::BAD_REQUEST,
            Self::Processing(ProcessingError::Extraction(error)) => match error {
                ExtractionError::EmptyUpload => StatusCode::BAD_REQUEST,
                ExtractionError::NotPdf => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ExtractionError::Unreadable(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ExtractionError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Fields collected from the upload form.
struct UploadForm {
    file: Option<Vec<u8>>,
    max_words: Option<String>,
}

/// Drain the multipart body, keeping the file bytes and the raw `max_words` value.
async fn read_upload(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm {
        file: None,
        max_words: None,
    };
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let bytes = field.bytes().await?;
                tracing::debug!(filename = %filename, bytes = bytes.len(), "File data received");
                form.file = Some(bytes.to_vec());
            }
            Some(MAX_WORDS_FIELD) => form.max_words = Some(field.text().await?),
            other => tracing::debug!(field = ?other, "Ignoring unknown form field"),
        }
    }
    Ok(form)
}

async fn summarize_form<S>(service: &S, form: UploadForm) -> Result<SummaryOutcome, AppError>
where
    S: SummaryApi,
{
    let budget = service.budget_policy().resolve(form.max_words.as_deref());
    let bytes = form.file.ok_or(AppError::MissingFile)?;
    Ok(service.summarize_document(bytes, budget).await?)
}

/// Render the empty upload page.
async fn show_form<S>(State(service): State<Arc<S>>) -> Html<String>
where
    S: SummaryApi,
{
    let policy = service.budget_policy();
    Html(render_page(&PageView {
        max_words: policy.default,
        max_words_limit: policy.limit,
        outcome: None,
        error: None,
    }))
}

/// Summarize an upload from the HTML form and render the page around the result.
#[tracing::instrument(skip(service, multipart))]
async fn upload_form<S>(State(service): State<Arc<S>>, multipart: Multipart) -> Response
where
    S: SummaryApi,
{
    let policy = service.budget_policy();
    let form = match read_upload(multipart).await {
        Ok(form) => form,
        Err(error) => return page_error(policy.default, policy.limit, &error),
    };
    let requested = policy.resolve(form.max_words.as_deref());
    match summarize_form(service.as_ref(), form).await {
        Ok(outcome) => Html(render_page(&PageView {
            max_words: outcome.max_words,
            max_words_limit: policy.limit,
            outcome: Some(outcome),
            error: None,
        }))
        .into_response(),
        Err(error) => page_error(requested, policy.limit, &error),
    }
}

fn page_error(max_words: WordBudget, limit: WordBudget, error: &AppError) -> Response {
    tracing::warn!(error = %error, "Upload failed");
    let page = render_page(&PageView {
        max_words,
        max_words_limit: limit,
        outcome: None,
        error: Some(format!("Error processing the upload: {error}")),
    });
    (error.status(), Html(page)).into_response()
}

/// Summarize an uploaded PDF and return the result as JSON.
#[tracing::instrument(skip(service, multipart))]
async fn summarize_upload<S>(
    State(service): State<Arc<S>>,
    multipart: Multipart,
) -> Result<Json<SummaryOutcome>, AppError>
where
    S: SummaryApi,
{
    let form = read_upload(multipart).await?;
    let outcome = summarize_form(service.as_ref(), form).await?;
    tracing::info!(
        max_words = outcome.max_words.get(),
        word_count = outcome.word_count,
        truncated = outcome.truncated,
        "Summarize request completed"
    );
    Ok(Json(outcome))
}

/// Request body for `POST /api/summarize/text`.
#[derive(Deserialize)]
struct TextRequest {
    /// Raw text, typically the output of a PDF extractor.
    text: String,
    /// Optional word budget. Numbers are clamped into the configured range; numeric strings
    /// are parsed first. Anything else falls back to the default.
    #[serde(default)]
    max_words: Option<Value>,
}

fn requested_budget(policy: &BudgetPolicy, max_words: Option<&Value>) -> WordBudget {
    match max_words {
        Some(Value::Number(number)) => number
            .as_i64()
            .map_or(policy.default, |requested| policy.clamp(requested)),
        Some(Value::String(raw)) => policy.resolve(Some(raw.as_str())),
        _ => policy.default,
    }
}

/// Summarize raw text supplied by the caller.
async fn summarize_text<S>(
    State(service): State<Arc<S>>,
    Json(request): Json<TextRequest>,
) -> Json<SummaryOutcome>
where
    S: SummaryApi,
{
    let policy = service.budget_policy();
    let budget = requested_budget(&policy, request.max_words.as_ref());
    Json(service.summarize_text(&request.text, budget))
}

/// Request body for `POST /api/highlight`.
#[derive(Deserialize)]
struct HighlightRequest {
    /// Summary previously returned by this server.
    summary: String,
    /// Term to highlight, matched case-insensitively.
    term: String,
}

/// Highlight a search term inside a caller-held summary.
async fn highlight_summary(Json(request): Json<HighlightRequest>) -> Json<Highlight> {
    Json(highlight(&request.summary, &request.term))
}

/// Return the summarization counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: SummaryApi,
{
    Json(service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery by tools.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "summarize",
                method: "POST",
                path: "/api/summarize",
                description: "Upload a PDF as multipart form data (`pdf_file`, optional `max_words` between 1 and the configured limit) and receive an extractive summary.",
                request_example: None,
            },
            CommandDescriptor {
                name: "summarize_text",
                method: "POST",
                path: "/api/summarize/text",
                description: "Summarize raw text. Whitespace is collapsed and leading sentences are kept until the word budget would overflow.",
                request_example: Some(json!({
                    "text": "The cat sat. The dog ran fast.",
                    "max_words": 5
                })),
            },
            CommandDescriptor {
                name: "highlight",
                method: "POST",
                path: "/api/highlight",
                description: "Return HTML for a summary with every case-insensitive occurrence of a term highlighted.",
                request_example: Some(json!({
                    "summary": "The cat sat. ...",
                    "term": "cat"
                })),
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return summarization counters.",
                request_example: None,
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::{create_router, get_commands};
    use crate::extraction::ExtractionError;
    use crate::metrics::MetricsSnapshot;
    use crate::processing::{
        BudgetPolicy, ProcessingError, SummaryApi, SummaryOutcome, WordBudget, build_outcome,
    };
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    const BOUNDARY: &str = "X-PDF-SUMMARY-BOUNDARY";

    #[derive(Default)]
    struct StubSummaryService {
        budgets: Mutex<Vec<usize>>,
        fail_with_not_pdf: bool,
    }

    #[async_trait]
    impl SummaryApi for StubSummaryService {
        async fn summarize_document(
            &self,
            bytes: Vec<u8>,
            budget: WordBudget,
        ) -> Result<SummaryOutcome, ProcessingError> {
            self.budgets.lock().expect("lock").push(budget.get());
            if self.fail_with_not_pdf {
                return Err(ExtractionError::NotPdf.into());
            }
            let text = String::from_utf8_lossy(&bytes).into_owned();
            Ok(build_outcome(&text, budget))
        }

        fn summarize_text(&self, raw: &str, budget: WordBudget) -> SummaryOutcome {
            build_outcome(raw, budget)
        }

        fn budget_policy(&self) -> BudgetPolicy {
            BudgetPolicy::default()
        }

        fn metrics_snapshot(&self) -> MetricsSnapshot {
            MetricsSnapshot::default()
        }
    }

    fn multipart_body(file: Option<&str>, max_words: Option<&str>) -> String {
        let mut body = String::new();
        if let Some(max_words) = max_words {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"max_words\"\r\n\r\n{max_words}\r\n"
            ));
        }
        if let Some(file) = file {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"pdf_file\"; filename=\"doc.pdf\"\r\nContent-Type: application/pdf\r\n\r\n{file}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn multipart_request(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request")
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    #[tokio::test]
    async fn commands_catalog_exposes_summarize_endpoint() {
        let commands = get_commands().await.0.commands;
        let summarize = commands
            .iter()
            .find(|cmd| cmd.name == "summarize")
            .expect("summarize command present");

        assert_eq!(summarize.method, "POST");
        assert_eq!(summarize.path, "/api/summarize");
        assert!(commands.len() >= 3);
    }

    #[tokio::test]
    async fn summarize_route_clamps_budget_and_returns_json() {
        let service = Arc::new(StubSummaryService::default());
        let app = create_router(service.clone(), 1024 * 1024);

        let body = multipart_body(
            Some("The cat sat. The dog ran fast. Birds fly high today."),
            Some("5"),
        );
        let response = app
            .oneshot(multipart_request("/api/summarize", body))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).expect("json body");
        assert_eq!(json["summary"], "The cat sat. ...");
        assert_eq!(json["max_words"], 5);
        assert_eq!(json["word_count"], 3);
        assert_eq!(json["truncated"], true);
        assert_eq!(*service.budgets.lock().expect("lock"), vec![5]);
    }

    #[tokio::test]
    async fn summarize_route_defaults_non_numeric_budget() {
        let service = Arc::new(StubSummaryService::default());
        let app = create_router(service.clone(), 1024 * 1024);

        let response = app
            .oneshot(multipart_request(
                "/api/summarize",
                multipart_body(Some("Hello there."), Some("many")),
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*service.budgets.lock().expect("lock"), vec![100]);
    }

    #[tokio::test]
    async fn missing_file_is_a_bad_request() {
        let app = create_router(Arc::new(StubSummaryService::default()), 1024 * 1024);
        let response = app
            .oneshot(multipart_request(
                "/api/summarize",
                multipart_body(None, Some("10")),
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).expect("json body");
        assert!(json["error"].as_str().expect("message").contains("pdf_file"));
    }

    #[tokio::test]
    async fn non_pdf_upload_is_unsupported_media_type() {
        let service = Arc::new(StubSummaryService {
            fail_with_not_pdf: true,
            ..Default::default()
        });
        let app = create_router(service, 1024 * 1024);
        let response = app
            .oneshot(multipart_request(
                "/api/summarize",
                multipart_body(Some("not a pdf"), None),
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn oversized_upload_is_payload_too_large() {
        let service = Arc::new(StubSummaryService::default());
        let app = create_router(service.clone(), 1024);
        let document = "Too many words here. ".repeat(200);

        let response = app
            .oneshot(multipart_request(
                "/api/summarize",
                multipart_body(Some(&document), Some("10")),
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).expect("json body");
        assert!(json["error"].as_str().expect("message").starts_with("Failed to read upload"));
        assert!(service.budgets.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn form_upload_renders_summary_page() {
        let app = create_router(Arc::new(StubSummaryService::default()), 1024 * 1024);
        let response = app
            .oneshot(multipart_request(
                "/",
                multipart_body(Some("First <b>bold</b> claim. Second claim."), Some("5")),
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Summary (up to 5 words)"));
        assert!(html.contains("First &lt;b&gt;bold&lt;/b&gt; claim. ..."));
        assert!(html.contains(r#"value="5""#));
    }

    #[tokio::test]
    async fn form_upload_error_renders_banner() {
        let service = Arc::new(StubSummaryService {
            fail_with_not_pdf: true,
            ..Default::default()
        });
        let app = create_router(service, 1024 * 1024);
        let response = app
            .oneshot(multipart_request("/", multipart_body(Some("zip"), Some("42"))))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let html = body_string(response).await;
        assert!(html.contains("alert-error"));
        assert!(html.contains(r#"value="42""#));
    }

    #[tokio::test]
    async fn index_serves_upload_form() {
        let app = create_router(Arc::new(StubSummaryService::default()), 1024 * 1024);
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains(r#"name="pdf_file""#));
        assert!(html.contains(r#"max="500" value="100""#));
    }

    #[tokio::test]
    async fn text_route_clamps_budget() {
        let app = create_router(Arc::new(StubSummaryService::default()), 1024 * 1024);
        let payload = json!({ "text": "Three word sentence.\n\nAnother one here.", "max_words": 0 });
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/summarize/text")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).expect("json body");
        assert_eq!(json["summary"], "...");
        assert_eq!(json["max_words"], 1);
    }

    async fn post_text(payload: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let app = create_router(Arc::new(StubSummaryService::default()), 1024 * 1024);
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/summarize/text")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request"),
            )
            .await
            .expect("router response");
        let status = response.status();
        let json = serde_json::from_str(&body_string(response).await).expect("json body");
        (status, json)
    }

    #[tokio::test]
    async fn text_route_defaults_non_numeric_budget() {
        let (status, json) =
            post_text(json!({ "text": "The cat sat. The dog ran.", "max_words": "lots" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["max_words"], 100);
        assert_eq!(json["summary"], "The cat sat. The dog ran. ...");

        let (status, json) = post_text(json!({ "text": "Hi.", "max_words": 2.5 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["max_words"], 100);
    }

    #[tokio::test]
    async fn text_route_accepts_numeric_strings() {
        let (status, json) =
            post_text(json!({ "text": "The cat sat. The dog ran.", "max_words": " 3 " })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["max_words"], 3);
        assert_eq!(json["summary"], "The cat sat. ...");

        let (_, json) = post_text(json!({ "text": "Hi.", "max_words": "9000" })).await;
        assert_eq!(json["max_words"], 500);
    }

    #[tokio::test]
    async fn highlight_route_marks_matches() {
        let app = create_router(Arc::new(StubSummaryService::default()), 1024 * 1024);
        let payload = json!({ "summary": "The cat sat. ...", "term": "CAT" });
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/highlight")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).expect("json body");
        assert_eq!(json["matches"], 1);
        assert_eq!(
            json["html"],
            r#"The <span class="highlight">cat</span> sat. ..."#
        );
    }
}
