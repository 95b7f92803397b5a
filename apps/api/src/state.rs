use std::time::Instant;

use crate::parser::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Parse pipeline with its extraction and structuring backends already injected.
    pub parser: ResumeParser,
    /// Process start, reported as uptime by the health check.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(parser: ResumeParser) -> Self {
        Self {
            parser,
            started_at: Instant::now(),
        }
    }
}
