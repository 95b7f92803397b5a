use std::time::Instant;

use chrono::Utc;

use crate::extraction::declared_extension;
use crate::models::response::{FileInfo, ParseMetadata, API_VERSION};

/// Accumulates metadata while a parse runs. File info is captured up front and
/// only ever enriched, so failure responses report the real upload too.
#[derive(Debug)]
pub struct MetadataBuilder {
    started: Instant,
    file_info: FileInfo,
    warnings: Vec<String>,
}

impl MetadataBuilder {
    pub fn start(filename: &str, file_size_bytes: usize) -> Self {
        Self {
            started: Instant::now(),
            file_info: FileInfo {
                original_filename: filename.to_string(),
                file_size_bytes,
                file_type: declared_extension(filename),
                pages_count: None,
            },
            warnings: Vec::new(),
        }
    }

    pub fn set_file_type(&mut self, file_type: &str) {
        self.file_info.file_type = file_type.to_string();
    }

    pub fn set_pages(&mut self, pages: usize) {
        self.file_info.pages_count = Some(pages);
    }

    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn finish(self) -> ParseMetadata {
        ParseMetadata {
            parsed_at: Utc::now(),
            file_info: self.file_info,
            processing_time_ms: self.started.elapsed().as_millis() as u64,
            api_version: API_VERSION,
            warnings: self.warnings,
        }
    }
}
