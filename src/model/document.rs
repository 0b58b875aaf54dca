//! Extracted document types.

use serde::Serialize;

use crate::detect::SourceFormat;

/// Text extracted from one uploaded file.
///
/// Created once per upload and never modified afterwards; a new upload
/// replaces it wholesale.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
    text: String,
    metadata: ExtractionMetadata,
}

/// Facts about how a document was extracted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionMetadata {
    /// Original file name as uploaded
    pub file_name: String,

    /// Format the extractor dispatched on
    pub source_format: Option<SourceFormat>,

    /// PDF version from the header, when present
    pub pdf_version: Option<String>,

    /// Total pages in the source (PDF only)
    pub page_count: Option<u32>,

    /// Pages whose text made it into the result
    pub pages_extracted: u32,

    /// Pages that failed and were skipped
    pub pages_failed: Vec<u32>,

    /// Whether pages beyond the processing cap were left out
    pub truncated: bool,
}

impl ExtractedDocument {
    /// Wrap already-normalized text.
    pub fn new(text: impl Into<String>, metadata: ExtractionMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Full extracted text, including blank-line separators.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Non-empty trimmed lines, in document order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines().map(str::trim).filter(|l| !l.is_empty())
    }

    /// Number of non-empty lines.
    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Number of characters of extracted text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if no text was extracted.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Extraction metadata.
    pub fn metadata(&self) -> &ExtractionMetadata {
        &self.metadata
    }

    /// Consume the document, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}
