//! OpenAPI 3.0 document for the public endpoints.
//!
//! The `CandidateProfile` schemas are generated from the Rust types with
//! `schemars`, so the documented shape cannot drift from what is served.

use axum::Json;
use schemars::generate::SchemaSettings;
use serde_json::{json, Value};

use crate::errors::ErrorCode;
use crate::models::profile::CandidateProfile;
use crate::models::response::API_VERSION;

/// GET /openapi.json
pub async fn openapi_handler() -> Json<Value> {
    Json(openapi_document())
}

pub fn openapi_document() -> Value {
    let mut generator = SchemaSettings::openapi3().into_generator();
    let profile = generator.subschema_for::<CandidateProfile>();
    let mut schemas = generator.definitions().clone();

    let error_codes: Vec<&str> = [
        ErrorCode::InvalidRequest,
        ErrorCode::FileMissing,
        ErrorCode::InvalidInput,
        ErrorCode::FileTooLarge,
        ErrorCode::UnsupportedFileType,
        ErrorCode::ParsingFailed,
        ErrorCode::NlpExtractionFailed,
    ]
    .into_iter()
    .map(ErrorCode::as_str)
    .collect();

    schemas.insert(
        "FileInfo".to_string(),
        json!({
            "type": "object",
            "required": ["original_filename", "file_size_bytes", "file_type"],
            "properties": {
                "original_filename": { "type": "string" },
                "file_size_bytes": { "type": "integer", "minimum": 0 },
                "file_type": { "type": "string", "example": "pdf" },
                "pages_count": { "type": "integer", "minimum": 1 }
            }
        }),
    );
    schemas.insert(
        "ParseMetadata".to_string(),
        json!({
            "type": "object",
            "required": ["parsed_at", "file_info", "processing_time_ms", "api_version", "warnings"],
            "properties": {
                "parsed_at": { "type": "string", "format": "date-time" },
                "file_info": { "$ref": "#/components/schemas/FileInfo" },
                "processing_time_ms": { "type": "integer", "minimum": 0 },
                "api_version": { "type": "string", "example": API_VERSION },
                "warnings": { "type": "array", "items": { "type": "string" } }
            }
        }),
    );
    schemas.insert(
        "ErrorBody".to_string(),
        json!({
            "type": "object",
            "required": ["code", "message", "suggestions"],
            "properties": {
                "code": { "type": "string", "enum": error_codes },
                "message": { "type": "string" },
                "details": { "type": "string" },
                "suggestions": { "type": "array", "items": { "type": "string" } }
            }
        }),
    );
    schemas.insert(
        "ParseSuccess".to_string(),
        json!({
            "type": "object",
            "required": ["success", "data", "metadata"],
            "properties": {
                "success": { "type": "boolean", "enum": [true] },
                "data": profile,
                "metadata": { "$ref": "#/components/schemas/ParseMetadata" }
            }
        }),
    );
    schemas.insert(
        "ParseFailure".to_string(),
        json!({
            "type": "object",
            "required": ["success", "error"],
            "properties": {
                "success": { "type": "boolean", "enum": [false] },
                "error": { "$ref": "#/components/schemas/ErrorBody" },
                "metadata": { "$ref": "#/components/schemas/ParseMetadata" }
            }
        }),
    );

    let failure = json!({
        "application/json": { "schema": { "$ref": "#/components/schemas/ParseFailure" } }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Resume Parser API",
            "version": API_VERSION,
            "description": "Extracts a structured candidate profile from an uploaded PDF resume."
        },
        "paths": {
            "/v1/parse/resume": {
                "post": {
                    "tags": ["Resume"],
                    "summary": "Parse a resume",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "multipart/form-data": {
                                "schema": {
                                    "type": "object",
                                    "required": ["file"],
                                    "properties": {
                                        "file": { "type": "string", "format": "binary" }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Resume parsed",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ParseSuccess" }
                                }
                            }
                        },
                        "400": { "description": "Invalid upload", "content": failure.clone() },
                        "500": { "description": "Extraction or structuring failed", "content": failure }
                    }
                }
            },
            "/health": {
                "get": {
                    "tags": ["Health"],
                    "summary": "Health check endpoint",
                    "responses": {
                        "200": {
                            "description": "API is healthy",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "status": { "type": "string", "example": "ok" },
                                            "uptime": { "type": "number", "example": 123.45 },
                                            "timestamp": { "type": "string", "format": "date-time" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": { "schemas": schemas }
    })
}
