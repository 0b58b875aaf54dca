//! Source format detection and validation.

use crate::error::{Error, Result};
use std::path::Path;

/// MIME type for plain text uploads.
pub const MIME_TEXT: &str = "text/plain";
/// MIME type for Office Open XML word-processor documents.
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// MIME type for PDF documents.
pub const MIME_PDF: &str = "application/pdf";
/// MIME type for legacy binary Word documents.
pub const MIME_DOC: &str = "application/msword";

/// Format of an uploaded resume, as declared by its MIME type or extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// UTF-8 plain text.
    Text,
    /// Office Open XML word-processor document (`.docx`).
    Docx,
    /// Portable Document Format.
    Pdf,
    /// Legacy binary Word document (`.doc`), recognised only to be rejected.
    LegacyDoc,
}

impl SourceFormat {
    /// Detection order: first matching format wins.
    pub const PRIORITY: [SourceFormat; 4] = [
        SourceFormat::Text,
        SourceFormat::Docx,
        SourceFormat::Pdf,
        SourceFormat::LegacyDoc,
    ];

    /// Canonical MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            SourceFormat::Text => MIME_TEXT,
            SourceFormat::Docx => MIME_DOCX,
            SourceFormat::Pdf => MIME_PDF,
            SourceFormat::LegacyDoc => MIME_DOC,
        }
    }

    /// Lowercase extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Text => "txt",
            SourceFormat::Docx => "docx",
            SourceFormat::Pdf => "pdf",
            SourceFormat::LegacyDoc => "doc",
        }
    }

    /// Whether a declared MIME type or file name identifies this format.
    pub fn matches(&self, declared_type: &str, file_name: &str) -> bool {
        let declared = declared_type.trim().to_ascii_lowercase();
        let declared = declared.split(';').next().unwrap_or("").trim();
        if declared == self.mime_type() {
            return true;
        }
        let name = file_name.to_lowercase();
        name.ends_with(&format!(".{}", self.extension()))
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SourceFormat::Text => "plain text",
            SourceFormat::Docx => "Word document (.docx)",
            SourceFormat::Pdf => "PDF",
            SourceFormat::LegacyDoc => "legacy Word document (.doc)",
        };
        f.write_str(label)
    }
}

/// Detect the source format from a declared MIME type and a file name.
///
/// Returns `None` when neither matches a known format.
pub fn detect_source_format(declared_type: &str, file_name: &str) -> Option<SourceFormat> {
    SourceFormat::PRIORITY
        .into_iter()
        .find(|format| format.matches(declared_type, file_name))
}

/// Guess a MIME type from a path's extension, for files read from disk.
pub fn mime_from_path<P: AsRef<Path>>(path: P) -> &'static str {
    let name = path
        .as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    detect_source_format("", &name)
        .map(|f| f.mime_type())
        .unwrap_or("application/octet-stream")
}

/// PDF format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0"), when the header carries one
    pub version: Option<String>,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(v) => write!(f, "PDF {}", v),
            None => write!(f, "PDF"),
        }
    }
}

/// PDF magic bytes.
const PDF_MAGIC: &[u8] = b"%PDF";
const VERSION_OFFSET: usize = 5; // after "%PDF-"
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Check the PDF magic number.
///
/// Only the first four bytes gate processing; the version is reported when
/// present but never required.
///
/// # Returns
/// * `Ok(PdfFormat)` if the data starts with `%PDF`
/// * `Err(Error::InvalidFormat)` otherwise
pub fn detect_pdf_header(data: &[u8]) -> Result<PdfFormat> {
    if !data.starts_with(PDF_MAGIC) {
        return Err(Error::InvalidFormat(
            "missing %PDF header; the file is not a PDF document".to_string(),
        ));
    }

    let version = data
        .get(VERSION_OFFSET..VERSION_OFFSET + VERSION_LEN)
        .filter(|_| data.get(PDF_MAGIC.len()) == Some(&b'-'))
        .map(|bytes| String::from_utf8_lossy(bytes).to_string())
        .filter(|v| is_valid_version(v));

    Ok(PdfFormat { version })
}

/// Check if bytes start with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_pdf_header(data).is_ok()
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    if version.len() != 3 {
        return false;
    }

    let chars: Vec<char> = version.chars().collect();
    chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}
