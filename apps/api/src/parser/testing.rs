//! Scriptable capability fakes shared by the parser and route tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use crate::extraction::{DocumentKind, ExtractionError, ExtractionResult, TextExtractor};
use crate::llm_client::LlmError;
use crate::models::profile::{CandidateProfile, PersonalInfo, ProfessionalSummary, Skills};
use crate::parser::structuring::StructuringClient;
use crate::parser::ResumeParser;

pub enum Extract {
    Text(&'static str, usize),
    Fail(&'static str),
    Hang,
}

pub struct FakeExtractor {
    behavior: Extract,
    calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn new(behavior: Extract) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for FakeExtractor {
    async fn extract(
        &self,
        _bytes: Bytes,
        _kind: DocumentKind,
    ) -> Result<ExtractionResult, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Extract::Text(text, page_count) => Ok(ExtractionResult {
                text: text.to_string(),
                page_count: *page_count,
            }),
            Extract::Fail(message) => Err(ExtractionError::Pdf(message.to_string())),
            Extract::Hang => std::future::pending().await,
        }
    }
}

pub enum Structure {
    Profile(CandidateProfile),
    ApiError(u16, &'static str),
    InvalidJson,
    Hang,
}

pub struct FakeStructurer {
    behavior: Structure,
    calls: AtomicUsize,
    last_text: Mutex<Option<String>>,
}

impl FakeStructurer {
    pub fn new(behavior: Structure) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_text: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuringClient for FakeStructurer {
    async fn structure(&self, text: &str) -> Result<CandidateProfile, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_text.lock().unwrap() = Some(text.to_string());
        match &self.behavior {
            Structure::Profile(profile) => Ok(profile.clone()),
            Structure::ApiError(status, message) => Err(LlmError::Api {
                status: *status,
                message: message.to_string(),
            }),
            Structure::InvalidJson => Err(LlmError::Parse(
                serde_json::from_str::<serde_json::Value>("{ invalid json").unwrap_err(),
            )),
            Structure::Hang => std::future::pending().await,
        }
    }
}

pub const JOHN_DOE_TEXT: &str = "John Doe\nSoftware Engineer\njohn@email.com";

/// The profile a model returns for `JOHN_DOE_TEXT`.
pub fn john_doe() -> CandidateProfile {
    CandidateProfile {
        personal_info: Some(PersonalInfo {
            full_name: Some("John Doe".to_string()),
            email: Some("john@email.com".to_string()),
            ..Default::default()
        }),
        professional_summary: Some(ProfessionalSummary {
            title: Some("Software Engineer".to_string()),
            ..Default::default()
        }),
        skills: Some(Skills::default()),
        work_experience: Some(vec![]),
        education: Some(vec![]),
        projects: Some(vec![]),
        languages: Some(vec![]),
    }
}

pub fn parser(extractor: &Arc<FakeExtractor>, structurer: &Arc<FakeStructurer>) -> ResumeParser {
    ResumeParser::new(extractor.clone(), structurer.clone())
}
