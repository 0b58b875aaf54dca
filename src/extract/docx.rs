//! Word-processor XML (`.docx`) extraction.
//!
//! Only visible text is kept: run text, tabs, and line breaks, with each
//! paragraph followed by a blank line. Styles, numbering, and drawings are
//! ignored.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;
use zip::result::ZipError;
use zip::ZipArchive;

use super::{collapse_blank_lines, SourceFile, TextExtractor};
use crate::detect::SourceFormat;
use crate::error::{Error, Result};
use crate::model::{ExtractedDocument, ExtractionMetadata};

/// Main document part inside the container.
const DOCUMENT_PART: &str = "word/document.xml";

/// Text runs, tabs, breaks, and paragraph ends, in document order. Tab stop
/// definitions (`<w:tab w:pos=..>`) carry attributes and are not matched.
const BODY_TOKEN_PATTERN: &str =
    r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:(tab|cr)\s*/>|<w:br(?:\s[^>]*)?/>|</w:p>|<w:p(?:\s[^>]*)?/>";

/// Extractor for `.docx` files.
#[derive(Debug, Clone, Default)]
pub struct DocxExtractor {
    _private: (),
}

impl DocxExtractor {
    /// Create a new DOCX extractor.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextExtractor for DocxExtractor {
    fn name(&self) -> &str {
        "docx"
    }

    fn format(&self) -> SourceFormat {
        SourceFormat::Docx
    }

    fn extract(&self, file: &SourceFile) -> Result<ExtractedDocument> {
        let xml = read_document_part(&file.bytes)?;
        let text = collapse_blank_lines(&document_text(&xml));

        if text.trim().is_empty() {
            return Err(Error::EmptyContent);
        }

        let metadata = ExtractionMetadata {
            file_name: file.name.clone(),
            source_format: Some(SourceFormat::Docx),
            ..Default::default()
        };
        Ok(ExtractedDocument::new(text.trim(), metadata))
    }
}

fn read_document_part(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
        ZipError::FileNotFound => {
            Error::CorruptSource(format!("DOCX container has no {}", DOCUMENT_PART))
        }
        other => Error::from(other),
    })?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| Error::CorruptSource(format!("{}: {}", DOCUMENT_PART, e)))?;
    Ok(xml)
}

fn body_tokens() -> &'static Regex {
    static BODY_TOKENS: OnceLock<Regex> = OnceLock::new();
    BODY_TOKENS.get_or_init(|| Regex::new(BODY_TOKEN_PATTERN).unwrap())
}

/// Flatten document XML into raw text.
fn document_text(xml: &str) -> String {
    let mut text = String::new();

    for caps in body_tokens().captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            text.push_str(&html_escape::decode_html_entities(run.as_str()));
        } else if let Some(kind) = caps.get(2) {
            text.push(if kind.as_str() == "tab" { '\t' } else { '\n' });
        } else if caps[0].starts_with("<w:br") {
            text.push('\n');
        } else {
            text.push_str("\n\n");
        }
    }

    text
}
