//! Rendering options, output formats, and download naming.

use chrono::{DateTime, Utc};

use super::JsonFormat;

/// Fallback title used for file names and document titles.
pub const DEFAULT_TITLE: &str = "professional-resume";

/// Options for rendering classified lines.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Longest subheading underline in plain text output
    pub underline_cap: usize,

    /// Wrap markup output in the title header and timestamp footer
    pub include_shell: bool,

    /// JSON layout
    pub json_format: JsonFormat,

    /// Font stack for markup output
    pub font_family: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subheading underline cap.
    pub fn with_underline_cap(mut self, cap: usize) -> Self {
        self.underline_cap = cap;
        self
    }

    /// Enable or disable the header and footer shell.
    pub fn with_shell(mut self, include: bool) -> Self {
        self.include_shell = include;
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Set the markup font stack.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            underline_cap: 50,
            include_shell: true,
            json_format: JsonFormat::Pretty,
            font_family: "'Calibri', sans-serif".to_string(),
        }
    }
}

/// Document-level facts carried into rendered output.
#[derive(Debug, Clone)]
pub struct RenderMeta {
    /// Job title the resume was tailored for
    pub title: Option<String>,

    /// When the artifact was generated
    pub generated_at: DateTime<Utc>,
}

impl RenderMeta {
    /// Metadata stamped with the current time.
    pub fn new(title: Option<String>) -> Self {
        Self::at(title, Utc::now())
    }

    /// Metadata with an explicit timestamp.
    pub fn at(title: Option<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: title.filter(|t| !t.trim().is_empty()),
            generated_at,
        }
    }

    /// Title for display, falling back to a generic label.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Professional Resume")
    }

    /// Human-readable generation timestamp.
    pub fn timestamp(&self) -> String {
        self.generated_at.format("%B %-d, %Y at %H:%M UTC").to_string()
    }
}

impl Default for RenderMeta {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Output artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Plain text with underlined headings
    #[default]
    Text,
    /// Word-processor HTML saved as `.doc`
    Word,
    /// Print-ready HTML
    Print,
    /// Classified lines as JSON
    Json,
}

impl OutputFormat {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Word => "doc",
            OutputFormat::Print => "html",
            OutputFormat::Json => "json",
        }
    }

    /// MIME type of the artifact.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain",
            OutputFormat::Word => "application/msword",
            OutputFormat::Print => "text/html",
            OutputFormat::Json => "application/json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "word" | "doc" => Ok(OutputFormat::Word),
            "print" | "html" => Ok(OutputFormat::Print),
            "json" => Ok(OutputFormat::Json),
            other => Err(crate::error::Error::Render(format!(
                "unknown output format: {}",
                other
            ))),
        }
    }
}

/// Build a download file name from a job title.
///
/// Characters outside `[A-Za-z0-9-_ ]` are dropped, whitespace runs become
/// `-`, and the result is lowercased. An empty result falls back to
/// `professional-resume`.
pub fn download_file_name(title: Option<&str>, format: OutputFormat) -> String {
    let cleaned: String = title
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_' || c.is_whitespace())
        .collect();
    let stem = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    let stem = if stem.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        stem
    };
    format!("{}.{}", stem, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            download_file_name(Some("Senior Engineer (Rust) @ Acme"), OutputFormat::Text),
            "senior-engineer-rust-acme.txt"
        );
        assert_eq!(
            download_file_name(Some("  Data_Lead  2024 "), OutputFormat::Word),
            "data_lead-2024.doc"
        );
        assert_eq!(
            download_file_name(None, OutputFormat::Print),
            "professional-resume.html"
        );
        assert_eq!(
            download_file_name(Some("!!!"), OutputFormat::Json),
            "professional-resume.json"
        );
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(OutputFormat::Word.mime_type(), "application/msword");
        assert_eq!(OutputFormat::Print.extension(), "html");
        assert_eq!("TXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_meta() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        let meta = RenderMeta::at(Some("  ".to_string()), at);
        assert_eq!(meta.title, None);
        assert_eq!(meta.display_title(), "Professional Resume");
        assert_eq!(meta.timestamp(), "March 5, 2024 at 14:30 UTC");
    }

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_underline_cap(20)
            .with_shell(false)
            .with_json_format(JsonFormat::Compact);
        assert_eq!(options.underline_cap, 20);
        assert!(!options.include_shell);
        assert_eq!(options.json_format, JsonFormat::Compact);
    }
}
