//! Structuring: turns plain resume text into a `CandidateProfile`.
//!
//! `ResumeParser` holds an `Arc<dyn StructuringClient>`; swap the backend
//! without touching the orchestrator or the handlers.

use async_trait::async_trait;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::profile::CandidateProfile;
use crate::parser::prompts::{RESUME_PARSE_PROMPT, RESUME_PARSE_SYSTEM};

#[async_trait]
pub trait StructuringClient: Send + Sync {
    async fn structure(&self, text: &str) -> Result<CandidateProfile, LlmError>;
}

/// Structures resumes through the chat-completions API in JSON-object mode.
pub struct LlmStructuringClient(pub LlmClient);

#[async_trait]
impl StructuringClient for LlmStructuringClient {
    async fn structure(&self, text: &str) -> Result<CandidateProfile, LlmError> {
        self.0
            .call_json::<CandidateProfile>(&build_prompt(text), &system_prompt())
            .await
    }
}

fn build_prompt(resume_text: &str) -> String {
    RESUME_PARSE_PROMPT.replace("{resume_text}", resume_text)
}

fn system_prompt() -> String {
    format!("{RESUME_PARSE_SYSTEM} {JSON_ONLY_SYSTEM}")
}
