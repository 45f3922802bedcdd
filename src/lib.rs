#![deny(missing_docs)]

//! Core library for the PDF summary server.

/// HTTP routing and handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Text extraction from uploaded documents.
pub mod extraction;
/// Keyword highlighting over finished summaries.
pub mod highlight;
/// Structured logging and tracing setup.
pub mod logging;
/// Summarization metrics helpers.
pub mod metrics;
/// Server-rendered upload page.
pub mod page;
/// Whitespace normalization, sentence splitting, and greedy summarization.
pub mod processing;
