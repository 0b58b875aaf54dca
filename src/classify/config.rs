//! Classifier thresholds and patterns.

use regex::Regex;

use crate::error::{Error, Result};

/// Canonical resume section keywords.
pub const SECTION_KEYWORDS: &[&str] = &[
    "EXPERIENCE",
    "EDUCATION",
    "SKILLS",
    "SUMMARY",
    "OBJECTIVE",
    "CERTIFICATION",
    "PROJECT",
    "CONTACT",
    "ACHIEVEMENT",
    "QUALIFICATION",
    "PROFESSIONAL",
    "TECHNICAL",
    "WORK",
    "CORE",
    "COMPETENCIES",
];

/// Month abbreviations as whole words, any case.
pub const MONTH_PATTERN: &str = r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\b";

/// A line that is exactly a North-American style phone number, optionally
/// separated.
pub const PHONE_PATTERN: &str = r"^\d{3}[-.\s]?\d{3}[-.\s]?\d{4}$";

/// Thresholds, keywords, and patterns that drive line classification.
///
/// Two presets cover the historical rule sets: [`ClassifierConfig::strict`]
/// and [`ClassifierConfig::keyword_aware`] (the default).
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Plain all-caps headings must be shorter than this (in characters)
    pub heading_max_len: usize,

    /// All-caps lines containing a section keyword may be up to this long;
    /// `None` disables keyword headings
    pub keyword_heading_max_len: Option<usize>,

    /// Section keywords for keyword headings
    pub section_keywords: Vec<String>,

    /// Characters that disqualify any heading
    pub heading_excluded_chars: Vec<char>,

    /// Extra characters that disqualify a keyword heading
    pub keyword_heading_excluded_chars: Vec<char>,

    /// Require at least one letter in a heading, so digit or rule lines
    /// such as `2019 - 2023` or `=====` never qualify. Off in both presets.
    pub heading_requires_letter: bool,

    /// Lines at least this long never match the loose subheading rule
    pub subheading_max_len: usize,

    /// Treat any `|` line under `subheading_max_len` as a subheading,
    /// not only those carrying a year
    pub loose_subheadings: bool,

    /// Date-like pattern marking a subheading (`None` disables)
    pub date_pattern: Option<Regex>,

    /// Bullet marker characters
    pub bullet_markers: Vec<char>,

    /// Phone-shaped pattern marking a contact line (`None` disables)
    pub phone_pattern: Option<Regex>,
}

impl ClassifierConfig {
    /// Short all-caps headings only; subheadings need a trailing colon or a
    /// `|` with a year; contact needs `@` or parentheses.
    pub fn strict() -> Self {
        Self {
            heading_max_len: 50,
            keyword_heading_max_len: None,
            section_keywords: Vec::new(),
            heading_excluded_chars: vec!['@', '(', '|'],
            keyword_heading_excluded_chars: Vec::new(),
            heading_requires_letter: false,
            subheading_max_len: 100,
            loose_subheadings: false,
            date_pattern: None,
            bullet_markers: vec!['•', '-'],
            phone_pattern: None,
        }
    }

    /// Strict rules plus longer keyword headings, month-name subheadings,
    /// and phone-number contacts.
    pub fn keyword_aware() -> Self {
        Self {
            keyword_heading_max_len: Some(80),
            section_keywords: SECTION_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            keyword_heading_excluded_chars: vec![':'],
            loose_subheadings: true,
            date_pattern: Some(Regex::new(MONTH_PATTERN).unwrap()),
            phone_pattern: Some(Regex::new(PHONE_PATTERN).unwrap()),
            ..Self::strict()
        }
    }

    /// Set the plain heading length threshold.
    pub fn with_heading_max_len(mut self, len: usize) -> Self {
        self.heading_max_len = len;
        self
    }

    /// Set or disable the keyword heading length threshold.
    pub fn with_keyword_heading_max_len(mut self, len: Option<usize>) -> Self {
        self.keyword_heading_max_len = len;
        self
    }

    /// Replace the section keyword list.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_keywords = keywords
            .into_iter()
            .map(|k| k.into().to_uppercase())
            .collect();
        self
    }

    /// Replace the date pattern.
    pub fn with_date_pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::InvalidRequest(format!("date pattern: {}", e)))?;
        self.date_pattern = Some(regex);
        Ok(self)
    }

    /// Replace the phone pattern.
    pub fn with_phone_pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::InvalidRequest(format!("phone pattern: {}", e)))?;
        self.phone_pattern = Some(regex);
        Ok(self)
    }

    /// Enable or disable the letter requirement for headings.
    pub fn with_heading_requires_letter(mut self, required: bool) -> Self {
        self.heading_requires_letter = required;
        self
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::keyword_aware()
    }
}
