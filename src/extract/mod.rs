//! Raw text extraction from uploaded files.
//!
//! Extractors are registered per [`SourceFormat`] and dispatched on the
//! file's declared MIME type or extension.
//!
//! # Example
//!
//! ```no_run
//! use resume_tailor::extract::{extract, SourceFile};
//!
//! fn main() -> resume_tailor::Result<()> {
//!     let bytes = std::fs::read("resume.docx")?;
//!     let file = SourceFile::new("resume.docx", "", bytes);
//!     let doc = extract(&file)?;
//!     for line in doc.lines() {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```

mod docx;
mod pdf;
mod text;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::detect::{detect_source_format, mime_from_path, SourceFormat};
use crate::error::{Error, Result};
use crate::model::ExtractedDocument;

/// An uploaded file: name, declared MIME type, and raw bytes.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name as uploaded
    pub name: String,

    /// MIME type declared by the uploader (may be empty)
    pub declared_type: String,

    /// Raw contents
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// Create a source file.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, declaring its type from the extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(name, mime_from_path(path), bytes))
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the file has no contents.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Trait for text extractors.
///
/// Implement this trait to add support for a new upload format.
pub trait TextExtractor: Send + Sync {
    /// Get the name of this extractor.
    fn name(&self) -> &str;

    /// Format this extractor handles.
    fn format(&self) -> SourceFormat;

    /// Extract text from an uploaded file.
    fn extract(&self, file: &SourceFile) -> Result<ExtractedDocument>;
}

/// Registry mapping source formats to extractors.
pub struct ExtractorRegistry {
    extractors: HashMap<SourceFormat, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Create a registry with the text, DOCX, and shared PDF extractors.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PlainTextExtractor::new()));
        registry.register(Arc::new(DocxExtractor::new()));
        registry.register(PdfExtractor::shared());
        registry
    }

    /// Register an extractor, replacing any previous one for its format.
    pub fn register(&mut self, extractor: Arc<dyn TextExtractor>) {
        self.extractors.insert(extractor.format(), extractor);
    }

    /// Get the extractor for a format.
    pub fn get(&self, format: SourceFormat) -> Option<Arc<dyn TextExtractor>> {
        self.extractors.get(&format).cloned()
    }

    /// Check if a format has an extractor.
    pub fn supports(&self, format: SourceFormat) -> bool {
        self.extractors.contains_key(&format)
    }

    /// Extract text, dispatching on the declared type or extension.
    pub fn extract(&self, file: &SourceFile) -> Result<ExtractedDocument> {
        let format = detect_source_format(&file.declared_type, &file.name).ok_or_else(|| {
            Error::UnsupportedFormat(format!(
                "Unsupported file type: {}",
                describe_upload(file)
            ))
        })?;

        if format == SourceFormat::LegacyDoc {
            return Err(Error::UnsupportedFormat(
                "Legacy Word documents (.doc) are not supported. Please save the file as DOCX or TXT."
                    .to_string(),
            ));
        }

        let extractor = self.get(format).ok_or_else(|| {
            Error::UnsupportedFormat(format!("No extractor registered for {}", format))
        })?;

        log::debug!(
            "Extracting {} ({} bytes) with {}",
            file.name,
            file.len(),
            extractor.name()
        );
        let doc = extractor.extract(file)?;
        log::info!(
            "{}: {} lines, {} characters",
            file.name,
            doc.line_count(),
            doc.char_count()
        );
        Ok(doc)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn describe_upload(file: &SourceFile) -> String {
    match (file.name.is_empty(), file.declared_type.is_empty()) {
        (false, false) => format!("{} ({})", file.name, file.declared_type),
        (false, true) => file.name.clone(),
        (true, false) => file.declared_type.clone(),
        (true, true) => "unnamed file".to_string(),
    }
}

fn default_registry() -> &'static ExtractorRegistry {
    static REGISTRY: OnceLock<ExtractorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ExtractorRegistry::with_defaults)
}

/// Extract text from an uploaded file with the default extractors.
pub fn extract(file: &SourceFile) -> Result<ExtractedDocument> {
    default_registry().extract(file)
}

/// Read a file from disk and extract its text.
pub fn extract_path<P: AsRef<Path>>(path: P) -> Result<ExtractedDocument> {
    let file = SourceFile::from_path(path)?;
    extract(&file)
}

/// Collapse three or more consecutive newlines into a single blank line.
pub(crate) fn collapse_blank_lines(text: &str) -> String {
    static BLANK_RUNS: OnceLock<Regex> = OnceLock::new();
    let re = BLANK_RUNS.get_or_init(|| Regex::new(r"\n{3,}").unwrap());
    re.replace_all(text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_text() {
        let file = SourceFile::new("resume.txt", "text/plain", b"JANE DOE\nENGINEER".to_vec());
        let doc = extract(&file).unwrap();
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.metadata().file_name, "resume.txt");
    }

    #[test]
    fn test_legacy_doc_rejected() {
        let file = SourceFile::new("resume.doc", "application/msword", b"\xD0\xCF\x11\xE0".to_vec());
        match extract(&file) {
            Err(Error::UnsupportedFormat(msg)) => assert!(msg.contains(".doc")),
            other => panic!("expected unsupported format, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let file = SourceFile::new("photo.png", "image/png", vec![0x89, b'P', b'N', b'G']);
        match extract(&file) {
            Err(Error::UnsupportedFormat(msg)) => assert!(msg.contains("photo.png")),
            other => panic!("expected unsupported format, got {:?}", other),
        }
    }

    #[test]
    fn test_pdf_extension_without_magic() {
        let file = SourceFile::new("resume.pdf", "", b"JANE DOE plain text".to_vec());
        assert!(matches!(extract(&file), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_registry_without_extractor() {
        let registry = ExtractorRegistry::new();
        assert!(!registry.supports(SourceFormat::Text));
        let file = SourceFile::new("a.txt", "", b"hello".to_vec());
        assert!(matches!(
            registry.extract(&file),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_registry_defaults() {
        let registry = ExtractorRegistry::default();
        assert!(registry.supports(SourceFormat::Text));
        assert!(registry.supports(SourceFormat::Docx));
        assert!(registry.supports(SourceFormat::Pdf));
        assert!(!registry.supports(SourceFormat::LegacyDoc));
        assert_eq!(registry.get(SourceFormat::Pdf).unwrap().name(), "pdf");
    }

    #[test]
    fn test_extract_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        std::fs::write(&path, "SUMMARY\nBuilds reliable systems").unwrap();

        let doc = extract_path(&path).unwrap();
        assert_eq!(doc.metadata().file_name, "cv.txt");
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn test_extract_path_missing_file() {
        assert!(matches!(
            extract_path("/nonexistent/cv.txt"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb\n\nc"), "a\n\nb\n\nc");
    }
}
