//! Model types shared by extraction, classification, and rendering.
//!
//! An [`ExtractedDocument`] is what the extractors produce from an upload;
//! [`ClassifiedLine`]s are the role-tagged view the renderers consume.

mod document;
mod line;

pub use document::{ExtractedDocument, ExtractionMetadata};
pub use line::{ClassifiedLine, Role};
