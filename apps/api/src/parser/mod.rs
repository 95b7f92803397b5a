// Resume parsing pipeline.
// Implements: upload validation, text extraction, LLM structuring, metadata assembly.
// All LLM calls go through llm_client; no direct OpenAI calls here.

pub mod handlers;
pub mod metadata;
pub mod orchestrator;
pub mod prompts;
pub mod structuring;

#[cfg(test)]
pub mod testing;

pub use orchestrator::{ParserLimits, ResumeParser, UploadedFile};
pub use structuring::LlmStructuringClient;
