//! PDF parsing module.

mod backend;
mod layout;
mod loader;
mod options;

pub use backend::{decode_text_simple, ContentOp, LopdfBackend, PdfBackend, PdfValue};
pub use layout::{collect_runs, normalize_run_text, reconstruct_lines, TextRun};
pub use loader::{DocumentLoader, LoaderChain, LopdfLoader};
pub use options::{
    ParseOptions, DEFAULT_LINE_TOLERANCE, DEFAULT_LOAD_TIMEOUT, DEFAULT_MAX_PAGES,
    DEFAULT_MIN_TEXT_CHARS,
};
