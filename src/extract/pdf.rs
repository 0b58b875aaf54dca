//! PDF extraction.

use std::sync::{Arc, OnceLock};

use rayon::prelude::*;
use unicode_normalization::UnicodeNormalization;

use super::{collapse_blank_lines, SourceFile, TextExtractor};
use crate::detect::{detect_pdf_header, SourceFormat};
use crate::error::{Error, Result};
use crate::model::{ExtractedDocument, ExtractionMetadata};
use crate::parser::{reconstruct_lines, LoaderChain, ParseOptions, PdfBackend};

/// Extractor for PDF documents.
///
/// Holds the loader chain used to open documents; build one explicitly to
/// inject a custom chain, or use [`PdfExtractor::shared`] for the
/// process-wide instance.
///
/// # Example
///
/// ```no_run
/// use resume_tailor::extract::PdfExtractor;
///
/// let bytes = std::fs::read("resume.pdf").unwrap();
/// let doc = PdfExtractor::shared().extract_bytes("resume.pdf", &bytes).unwrap();
/// println!("{} lines", doc.line_count());
/// ```
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    chain: LoaderChain,
    options: ParseOptions,
}

impl PdfExtractor {
    /// Create an extractor with default options and the standard loader chain.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create an extractor with the given options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            chain: LoaderChain::standard(options.load_timeout),
            options,
        }
    }

    /// Replace the loader chain.
    pub fn with_chain(mut self, chain: LoaderChain) -> Self {
        self.chain = chain;
        self
    }

    /// Process-wide extractor, created on first use.
    pub fn shared() -> Arc<PdfExtractor> {
        static SHARED: OnceLock<Arc<PdfExtractor>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(PdfExtractor::new())))
    }

    /// Active options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Extract text from PDF bytes.
    pub fn extract_bytes(&self, file_name: &str, data: &[u8]) -> Result<ExtractedDocument> {
        let header = detect_pdf_header(data)?;
        log::debug!("{}: {} header, {} bytes", file_name, header, data.len());

        let backend = self.chain.load(data)?;
        self.extract_from_backend(file_name, backend.as_ref())
    }

    /// Extract text from an already loaded document.
    ///
    /// Processes up to `max_pages` pages; a page that fails is logged and
    /// skipped, and pages past the cap are left out.
    pub fn extract_from_backend(
        &self,
        file_name: &str,
        backend: &dyn PdfBackend,
    ) -> Result<ExtractedDocument> {
        let page_count = backend.page_count();
        let limit = page_count.min(self.options.max_pages);
        if page_count > limit {
            log::info!(
                "{}: processing first {} of {} pages",
                file_name,
                limit,
                page_count
            );
        }

        let tolerance = self.options.line_tolerance;
        let process = |page: u32| {
            let text = backend
                .page_runs(page)
                .map(|runs| reconstruct_lines(runs, tolerance));
            (page, text)
        };

        let results: Vec<(u32, Result<String>)> = if self.options.parallel {
            (1..=limit).into_par_iter().map(process).collect()
        } else {
            (1..=limit).map(process).collect()
        };

        let mut pages = Vec::with_capacity(results.len());
        let mut pages_failed = Vec::new();
        for (page, result) in results {
            match result {
                Ok(text) => pages.push(text),
                Err(e) => {
                    log::warn!("{}: skipping page {}: {}", file_name, page, e);
                    pages_failed.push(page);
                }
            }
        }

        let pages_extracted = pages.len() as u32;
        let joined = pages
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        let text = finalize_text(&joined);

        let chars = text.chars().count();
        if chars < self.options.min_text_chars {
            return Err(Error::NoTextExtracted { chars });
        }

        log::info!(
            "{}: extracted {} characters from {} of {} pages",
            file_name,
            chars,
            pages_extracted,
            page_count
        );

        let metadata = ExtractionMetadata {
            file_name: file_name.to_string(),
            source_format: Some(SourceFormat::Pdf),
            pdf_version: backend.version(),
            page_count: Some(page_count),
            pages_extracted,
            pages_failed,
            truncated: page_count > limit,
        };
        Ok(ExtractedDocument::new(text, metadata))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfExtractor {
    fn name(&self) -> &str {
        "pdf"
    }

    fn format(&self) -> SourceFormat {
        SourceFormat::Pdf
    }

    fn extract(&self, file: &SourceFile) -> Result<ExtractedDocument> {
        self.extract_bytes(&file.name, &file.bytes)
    }
}

/// NFC-normalize, collapse runs of blank lines, and trim.
fn finalize_text(text: &str) -> String {
    let normalized: String = text.nfc().collect();
    collapse_blank_lines(&normalized).trim().to_string()
}
