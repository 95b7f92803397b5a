use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::errors::{ErrorCode, ParseFailure};
use crate::models::profile::CandidateProfile;

pub const API_VERSION: &str = "1.0.0";

/// The only result type of a parse request. A success never carries an error
/// and a failure never carries a profile.
#[derive(Debug, Clone)]
pub enum ParseResponse {
    Success(ParseSuccess),
    Failure(FailureBody),
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseSuccess {
    pub data: CandidateProfile,
    pub metadata: ParseMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureBody {
    pub error: ErrorBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ParseMetadata>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseMetadata {
    pub parsed_at: DateTime<Utc>,
    pub file_info: FileInfo,
    pub processing_time_ms: u64,
    pub api_version: &'static str,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    pub original_filename: String,
    pub file_size_bytes: usize,
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_count: Option<usize>,
}

impl ParseResponse {
    pub fn success(data: CandidateProfile, metadata: ParseMetadata) -> Self {
        ParseResponse::Success(ParseSuccess { data, metadata })
    }

    pub fn failure(failure: ParseFailure, metadata: Option<ParseMetadata>) -> Self {
        ParseResponse::Failure(FailureBody {
            error: ErrorBody::from(failure),
            metadata,
        })
    }

    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResponse::Success(_))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ParseResponse::Success(_) => StatusCode::OK,
            ParseResponse::Failure(body) => body.error.code.status(),
        }
    }

    #[cfg(test)]
    pub fn metadata(&self) -> Option<&ParseMetadata> {
        match self {
            ParseResponse::Success(body) => Some(&body.metadata),
            ParseResponse::Failure(body) => body.metadata.as_ref(),
        }
    }
}

impl From<ParseFailure> for ErrorBody {
    fn from(failure: ParseFailure) -> Self {
        ErrorBody {
            suggestions: failure
                .code
                .suggestions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            code: failure.code,
            message: failure.message,
            details: failure.details,
        }
    }
}

/// Serialized as `{"success": true, ...}` / `{"success": false, ...}`.
impl Serialize for ParseResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Tagged<'a, T: Serialize> {
            success: bool,
            #[serde(flatten)]
            body: &'a T,
        }

        match self {
            ParseResponse::Success(body) => Tagged {
                success: true,
                body,
            }
            .serialize(serializer),
            ParseResponse::Failure(body) => Tagged {
                success: false,
                body,
            }
            .serialize(serializer),
        }
    }
}

impl IntoResponse for ParseResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
