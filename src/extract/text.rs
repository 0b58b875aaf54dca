//! Plain text extraction.

use super::{SourceFile, TextExtractor};
use crate::detect::SourceFormat;
use crate::error::{Error, Result};
use crate::model::{ExtractedDocument, ExtractionMetadata};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Extractor for UTF-8 plain text files.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor {
    _private: (),
}

impl PlainTextExtractor {
    /// Create a new plain text extractor.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "text"
    }

    fn format(&self) -> SourceFormat {
        SourceFormat::Text
    }

    fn extract(&self, file: &SourceFile) -> Result<ExtractedDocument> {
        let bytes = file.bytes.strip_prefix(UTF8_BOM).unwrap_or(&file.bytes[..]);
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::CorruptSource(format!("not valid UTF-8 text: {}", e)))?;

        if text.trim().is_empty() {
            return Err(Error::EmptyContent);
        }

        let metadata = ExtractionMetadata {
            file_name: file.name.clone(),
            source_format: Some(SourceFormat::Text),
            ..Default::default()
        };
        Ok(ExtractedDocument::new(text, metadata))
    }
}
