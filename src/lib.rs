//! # resume-tailor
//!
//! Resume text extraction, structure classification, and rendering.
//!
//! Uploaded resumes (plain text, DOCX, or PDF) are reduced to plain text,
//! each line is tagged with a structural role (heading, subheading, bullet,
//! contact, paragraph), and the tagged lines are rendered back out as plain
//! text, word-processor markup, print-ready HTML, or JSON. An optional
//! tailoring boundary sends the text to a remote service and feeds the
//! rewritten resume back through the same pipeline.
//!
//! ## Quick Start
//!
//! ```no_run
//! use resume_tailor::{extract_file, render::OutputFormat, ResumeTailor};
//!
//! fn main() -> resume_tailor::Result<()> {
//!     let result = ResumeTailor::new()
//!         .with_title("Backend Engineer")
//!         .process_path("resume.pdf")?;
//!
//!     println!("{}", result.render(OutputFormat::Text)?);
//!
//!     // Or just the raw text
//!     let doc = extract_file("resume.docx")?;
//!     println!("{} lines", doc.line_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Multiple input formats**: plain text, DOCX, PDF
//! - **Layout reconstruction**: PDF text runs regrouped into lines by position
//! - **Fallback loading**: PDF loaders tried in order, each under a timeout
//! - **Role classification**: configurable rule set, strict or keyword-aware
//! - **Multiple output formats**: plain text, Word-compatible HTML, print HTML, JSON
//! - **Tailoring client**: webhook and chat-completion services with best-effort saving

pub mod classify;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;
pub mod tailor;

// Re-export commonly used types
pub use classify::{classify, Classifier, ClassifierConfig};
pub use detect::{detect_source_format, is_pdf_bytes, SourceFormat};
pub use error::{Error, ErrorClass, Result};
pub use extract::{ExtractorRegistry, PdfExtractor, SourceFile, TextExtractor};
pub use model::{ClassifiedLine, ExtractedDocument, ExtractionMetadata, Role};
pub use parser::ParseOptions;
pub use render::{OutputFormat, RenderMeta, RenderOptions, Rendered};
pub use tailor::{TailorConfig, TailorRequest, TailoredText, TailoringService, TailoringSession};

use std::path::Path;
use std::sync::Arc;

/// Extract text from a file on disk.
///
/// # Example
///
/// ```no_run
/// use resume_tailor::extract_file;
///
/// let doc = extract_file("resume.pdf").unwrap();
/// println!("{}", doc.text());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractedDocument> {
    extract::extract_path(path)
}

/// Extract text from in-memory bytes.
///
/// The declared type may be empty; the name's extension is used then.
pub fn extract_bytes(name: &str, declared_type: &str, bytes: Vec<u8>) -> Result<ExtractedDocument> {
    extract::extract(&SourceFile::new(name, declared_type, bytes))
}

/// Extract and classify a file on disk.
pub fn classify_file<P: AsRef<Path>>(path: P) -> Result<Vec<ClassifiedLine>> {
    let doc = extract_file(path)?;
    Ok(Classifier::default().classify_document(&doc))
}

/// Classify text and render it in one step.
///
/// # Example
///
/// ```
/// use resume_tailor::{render_text, OutputFormat};
///
/// let out = render_text("SKILLS\n• Rust", OutputFormat::Text).unwrap();
/// assert_eq!(out, "SKILLS\n======\n\n• Rust");
/// ```
pub fn render_text(text: &str, format: OutputFormat) -> Result<String> {
    let lines = classify(text);
    render::render(&lines, format, &RenderMeta::new(None), &RenderOptions::default())
}

/// Builder for the extract, classify, render pipeline.
///
/// # Example
///
/// ```no_run
/// use resume_tailor::{ClassifierConfig, OutputFormat, ResumeTailor};
///
/// let rendered = ResumeTailor::new()
///     .with_classifier(ClassifierConfig::strict())
///     .with_title("Data Engineer")
///     .process_path("resume.docx")?
///     .render_download(OutputFormat::Word)?;
/// std::fs::write(&rendered.file_name, rendered.content)?;
/// # Ok::<(), resume_tailor::Error>(())
/// ```
pub struct ResumeTailor {
    parse_options: Option<ParseOptions>,
    classifier: Classifier,
    render_options: RenderOptions,
    title: Option<String>,
}

impl ResumeTailor {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            parse_options: None,
            classifier: Classifier::default(),
            render_options: RenderOptions::default(),
            title: None,
        }
    }

    /// Use custom PDF parse options instead of the shared extractor.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = Some(options);
        self
    }

    /// Set the classifier configuration.
    pub fn with_classifier(mut self, config: ClassifierConfig) -> Self {
        self.classifier = Classifier::new(config);
        self
    }

    /// Set render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the job title used in rendered headers and file names.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn registry(&self) -> ExtractorRegistry {
        let mut registry = ExtractorRegistry::with_defaults();
        if let Some(options) = &self.parse_options {
            registry.register(Arc::new(PdfExtractor::with_options(options.clone())));
        }
        registry
    }

    /// Extract and classify an uploaded file.
    pub fn process(self, file: &SourceFile) -> Result<ResumeResult> {
        let document = self.registry().extract(file)?;
        Ok(self.finish(document))
    }

    /// Read, extract, and classify a file on disk.
    pub fn process_path<P: AsRef<Path>>(self, path: P) -> Result<ResumeResult> {
        let file = SourceFile::from_path(path)?;
        self.process(&file)
    }

    /// Classify text that is already extracted, such as a tailored resume.
    pub fn process_text(self, text: &str) -> ResumeResult {
        self.finish(ExtractedDocument::new(text, ExtractionMetadata::default()))
    }

    fn finish(self, document: ExtractedDocument) -> ResumeResult {
        let lines = self.classifier.classify_document(&document);
        ResumeResult {
            document,
            lines,
            meta: RenderMeta::new(self.title),
            render_options: self.render_options,
        }
    }
}

impl Default for ResumeTailor {
    fn default() -> Self {
        Self::new()
    }
}

/// An extracted and classified resume, ready to render.
pub struct ResumeResult {
    /// The extracted document
    pub document: ExtractedDocument,
    /// Classified lines, in document order
    pub lines: Vec<ClassifiedLine>,
    meta: RenderMeta,
    render_options: RenderOptions,
}

impl ResumeResult {
    /// Render in the given format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        render::render(&self.lines, format, &self.meta, &self.render_options)
    }

    /// Render with a download file name and MIME type.
    pub fn render_download(&self, format: OutputFormat) -> Result<Rendered> {
        render::render_download(&self.lines, format, &self.meta, &self.render_options)
    }

    /// Render metadata (title and timestamp).
    pub fn meta(&self) -> &RenderMeta {
        &self.meta
    }

    /// Extracted text without classification.
    pub fn text(&self) -> &str {
        self.document.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_helper() {
        let out = render_text("JANE DOE\njane@example.com", OutputFormat::Text).unwrap();
        assert_eq!(out, "JANE DOE\n========\n\njane@example.com");
    }

    #[test]
    fn test_extract_bytes_plain_text() {
        let doc = extract_bytes("resume.txt", "text/plain", b"JANE DOE\nEngineer".to_vec()).unwrap();
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn test_extract_bytes_unknown_type() {
        let result = extract_bytes("resume.rtf", "application/rtf", b"{\\rtf1}".to_vec());
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_extract_bytes_not_a_pdf() {
        let result = extract_bytes("resume.pdf", "application/pdf", b"hello world".to_vec());
        assert!(matches!(result, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_builder_process_text() {
        let result = ResumeTailor::new()
            .with_title("QA Lead")
            .process_text("SUMMARY\n- Automated regression suites");

        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0].role, Role::Heading);
        assert_eq!(result.lines[1].role, Role::Bullet);
        assert_eq!(result.meta().display_title(), "QA Lead");

        let rendered = result.render_download(OutputFormat::Json).unwrap();
        assert_eq!(rendered.file_name, "qa-lead.json");
    }

    #[test]
    fn test_builder_process_upload() {
        let file = SourceFile::new("cv.txt", "", b"EXPERIENCE\nEngineer | Acme | 2021".to_vec());
        let result = ResumeTailor::new()
            .with_classifier(ClassifierConfig::strict())
            .process(&file)
            .unwrap();
        assert_eq!(result.lines[1].role, Role::Subheading);
        assert_eq!(result.text(), "EXPERIENCE\nEngineer | Acme | 2021");
    }

    #[test]
    fn test_builder_custom_parse_options() {
        let file = SourceFile::new("cv.pdf", "application/pdf", b"%PDF-1.4\ngarbage".to_vec());
        let result = ResumeTailor::new()
            .with_parse_options(ParseOptions::new().with_max_pages(2))
            .process(&file);
        assert!(result.is_err());
    }
}
