//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for PDF operations, isolating
//! the concrete PDF library (lopdf) from page text reconstruction.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::layout::{collect_runs, TextRun};
use crate::error::{Error, Result};

/// A value from a PDF content stream operand.
#[derive(Debug, Clone)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

/// A loaded PDF document, as seen by the extractor.
///
/// Implementations must be shareable across threads so pages can be
/// processed in parallel.
pub trait PdfBackend: Send + Sync {
    /// PDF version, when known.
    fn version(&self) -> Option<String>;

    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Positioned text runs for a 1-based page number.
    fn page_runs(&self, page_number: u32) -> Result<Vec<TextRun>>;
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfBackend {
    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc))
    }

    /// Wrap an already loaded document.
    pub fn from_document(doc: LopdfDocument) -> Self {
        let pages = doc.get_pages();
        Self { doc, pages }
    }

    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;

        // A page without a content stream is blank, not broken.
        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Stream(s) => Ok(s.decompressed_content()?),
                Object::Array(arr) => Ok(self.concat_streams(arr)),
                _ => Err(Error::CorruptSource("invalid content stream".to_string())),
            },
            Object::Array(arr) => Ok(self.concat_streams(arr)),
            _ => Err(Error::CorruptSource("invalid content stream".to_string())),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in refs {
            if let Object::Reference(r) = obj {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    if let Ok(data) = s.decompressed_content() {
                        content.extend_from_slice(&data);
                        content.push(b' ');
                    }
                }
            }
        }
        content
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content = lopdf::content::Content::decode(data)?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operands: op.operands.iter().map(convert_object).collect(),
                operator: op.operator,
            })
            .collect())
    }

    fn decode_text(
        &self,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        font_name: &[u8],
        bytes: &[u8],
    ) -> String {
        fonts
            .get(font_name)
            .and_then(|font| font.get_font_encoding(&self.doc).ok())
            .and_then(|enc| LopdfDocument::decode_text(&enc, bytes).ok())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }
}

impl PdfBackend for LopdfBackend {
    fn version(&self) -> Option<String> {
        Some(self.doc.version.to_string())
    }

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_runs(&self, page_number: u32) -> Result<Vec<TextRun>> {
        let page_id = *self
            .pages
            .get(&page_number)
            .ok_or(Error::PageOutOfRange(page_number, self.page_count()))?;

        let content = self.page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }
        let ops = self.decode_content(&content)?;
        let fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();

        let runs = collect_runs(&ops, |font, bytes| self.decode_text(&fonts, font, bytes));
        log::debug!("Page {}: {} text runs", page_number, runs.len());
        Ok(runs)
    }
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

/// Helper: extract a number from a [`PdfValue`].
pub fn get_number_from_value(val: &PdfValue) -> Option<f32> {
    match val {
        PdfValue::Integer(i) => Some(*i as f32),
        PdfValue::Real(r) => Some(*r),
        _ => None,
    }
}
