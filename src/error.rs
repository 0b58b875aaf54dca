//! Error types for resume-tailor.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for resume-tailor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting, rendering, or tailoring a resume.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No extractor handles the declared type or extension.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The source decoded fine but contained no text.
    #[error("No text content found in document")]
    EmptyContent,

    /// Extraction ran but produced too little text to be usable.
    #[error("No text extracted ({chars} characters found)")]
    NoTextExtracted { chars: usize },

    /// Structural validation failed before a full parse was attempted.
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// The underlying parser failed on an ostensibly well-typed input.
    #[error("Corrupted source: {0}")]
    CorruptSource(String),

    /// A bounded operation did not complete in time.
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// A backend needed for extraction could not be reached or started.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The document is password protected or encrypted.
    #[error("Document is password protected")]
    Protected,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// A tailoring request is missing required fields.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The tailoring service failed or returned nothing usable.
    #[error("Tailoring failed: {0}")]
    Tailoring(String),

    /// The persistence boundary rejected or failed to store a record.
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// Transport error from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A tailoring request is already in flight.
    #[error("A tailoring request is already in progress")]
    Busy,
}

/// User-facing grouping of extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The file type is not handled.
    UnsupportedFormat,
    /// The source holds no usable text.
    NoText,
    /// The source is damaged, malformed, or encrypted.
    CorruptOrProtected,
    /// A backend was slow or unreachable; retrying may help.
    Unavailable,
}

impl ErrorClass {
    /// Short headline for the class.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorClass::UnsupportedFormat => "Unsupported file",
            ErrorClass::NoText => "No text found",
            ErrorClass::CorruptOrProtected => "Unreadable file",
            ErrorClass::Unavailable => "Processing unavailable",
        }
    }
}

impl Error {
    /// Map an error to its user-facing extraction class.
    ///
    /// Returns `None` for errors outside the extraction surface (tailoring,
    /// persistence, I/O while saving output).
    pub fn class(&self) -> Option<ErrorClass> {
        match self {
            Error::UnsupportedFormat(_) | Error::InvalidFormat(_) => {
                Some(ErrorClass::UnsupportedFormat)
            }
            Error::EmptyContent | Error::NoTextExtracted { .. } => Some(ErrorClass::NoText),
            Error::CorruptSource(_) | Error::Protected | Error::PageOutOfRange(..) => {
                Some(ErrorClass::CorruptOrProtected)
            }
            Error::Timeout(_) | Error::BackendUnavailable(_) => Some(ErrorClass::Unavailable),
            _ => None,
        }
    }

    /// Whether the error came from the tailoring or persistence boundary
    /// rather than from reading the resume.
    pub fn is_tailoring(&self) -> bool {
        matches!(
            self,
            Error::InvalidRequest(_)
                | Error::Tailoring(_)
                | Error::Persistence(_)
                | Error::Http(_)
                | Error::Busy
        )
    }

    /// Whether a different loader might succeed where this one failed.
    pub fn is_retryable_load(&self) -> bool {
        matches!(
            self,
            Error::Timeout(_) | Error::BackendUnavailable(_) | Error::CorruptSource(_)
        )
    }

    /// An actionable message suitable for showing to the person who uploaded the file.
    pub fn user_message(&self) -> String {
        match self {
            Error::UnsupportedFormat(detail) => format!(
                "{}\n\nSupported formats: TXT (plain text), DOCX (Microsoft Word), PDF.",
                detail
            ),
            Error::InvalidFormat(_) => "Invalid file format. Please ensure you have selected a valid document; the file contents do not match its type.".to_string(),
            Error::EmptyContent => "The file appears to be empty or contains no readable text.".to_string(),
            Error::NoTextExtracted { .. } => "No readable text found in this PDF. It may be a scanned or image-based document. Please try converting to TXT or DOCX format.".to_string(),
            Error::Protected => "This document is password-protected. Please remove the protection or convert to TXT format.".to_string(),
            Error::CorruptSource(detail) => format!(
                "The file could not be read and may be corrupted. Please try converting to TXT or DOCX format.\n\nError: {}",
                detail
            ),
            Error::Timeout(_) => "Document processing timed out. The file may be too large or complex. Please try converting to TXT format.".to_string(),
            Error::BackendUnavailable(_) => "Document processing is temporarily unavailable. Please try again or convert to TXT format.".to_string(),
            Error::InvalidRequest(detail) | Error::Tailoring(detail) => detail.clone(),
            Error::Persistence(detail) => format!("The tailored resume could not be saved: {}", detail),
            Error::Http(e) if e.is_timeout() => "The tailoring service did not respond in time. Please try again.".to_string(),
            other => other.to_string(),
        }
    }

    /// Build an error from parser failure text, recognising encryption and
    /// backend failures by their wording.
    pub fn from_parser_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("password") || lower.contains("encrypt") || lower.contains("decrypt") {
            Error::Protected
        } else if lower.contains("worker") || lower.contains("fetch") || lower.contains("network")
        {
            Error::BackendUnavailable(message)
        } else {
            Error::CorruptSource(message)
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Protected,
            _ => Error::from_parser_message(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::CorruptSource(format!("DOCX container: {}", err))
    }
}
