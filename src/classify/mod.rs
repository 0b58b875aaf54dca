//! Line classification for resume text.
//!
//! Splits text into non-empty trimmed lines and assigns each a [`Role`]
//! using positional and lexical heuristics. Rules are tried in order and the
//! first match wins:
//!
//! 1. heading: all caps, short, no contact punctuation
//! 2. subheading: trailing colon, pipe with a year, or a month name
//!    (never the first line, never a bulleted line)
//! 3. bullet: leading `•` or `-`, which is stripped
//! 4. contact: `@`, parentheses, or a bare phone number
//! 5. paragraph: everything else
//!
//! Classification is total: every line gets a role.

mod config;

pub use config::{ClassifierConfig, MONTH_PATTERN, PHONE_PATTERN, SECTION_KEYWORDS};

use crate::model::{ClassifiedLine, ExtractedDocument, Role};

/// Classify text with the default (keyword-aware) rules.
///
/// # Example
///
/// ```
/// use resume_tailor::{classify, Role};
///
/// let lines = classify("EXPERIENCE\n• Shipped the billing rewrite");
/// assert_eq!(lines[0].role, Role::Heading);
/// assert_eq!(lines[1].content, "Shipped the billing rewrite");
/// ```
pub fn classify(text: &str) -> Vec<ClassifiedLine> {
    Classifier::default().classify(text)
}

/// Line classifier driven by a [`ClassifierConfig`].
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier with the given configuration.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classifier using the strict rule set.
    pub fn strict() -> Self {
        Self::new(ClassifierConfig::strict())
    }

    /// Active configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify every non-empty line of `text`.
    pub fn classify(&self, text: &str) -> Vec<ClassifiedLine> {
        self.classify_lines(text.lines())
    }

    /// Classify the lines of an extracted document.
    pub fn classify_document(&self, doc: &ExtractedDocument) -> Vec<ClassifiedLine> {
        self.classify_lines(doc.lines())
    }

    /// Classify a sequence of raw lines. Blank lines are dropped and do not
    /// count towards the line index.
    pub fn classify_lines<'a, I>(&self, lines: I) -> Vec<ClassifiedLine>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
            .map(|(index, line)| self.classify_line(line, index))
            .collect()
    }

    /// Classify a single trimmed line at position `index` among the
    /// document's non-empty lines.
    pub fn classify_line(&self, line: &str, index: usize) -> ClassifiedLine {
        let line = line.trim();

        if self.is_heading(line) {
            return ClassifiedLine::heading(line);
        }

        let marker = self.bullet_marker(line);

        if index > 0 && marker.is_none() && self.is_subheading(line) {
            return ClassifiedLine::subheading(line);
        }

        if let Some(marker) = marker {
            let content = line[marker.len_utf8()..].trim();
            return ClassifiedLine::bullet(content);
        }

        if self.is_contact(line) {
            return ClassifiedLine::contact(line);
        }

        ClassifiedLine::paragraph(line)
    }

    /// Classify and return only the role.
    pub fn role_of(&self, line: &str, index: usize) -> Role {
        self.classify_line(line, index).role
    }

    fn is_heading(&self, line: &str) -> bool {
        if line.to_uppercase() != line {
            return false;
        }
        if self.config.heading_requires_letter && !line.chars().any(char::is_alphabetic) {
            return false;
        }

        let len = line.chars().count();
        let has_excluded = line
            .chars()
            .any(|c| self.config.heading_excluded_chars.contains(&c));
        if has_excluded {
            return false;
        }

        if len < self.config.heading_max_len {
            return true;
        }

        match self.config.keyword_heading_max_len {
            Some(max_len) if len < max_len => {
                let has_keyword_excluded = line
                    .chars()
                    .any(|c| self.config.keyword_heading_excluded_chars.contains(&c));
                !has_keyword_excluded
                    && self
                        .config
                        .section_keywords
                        .iter()
                        .any(|k| line.contains(k.as_str()))
            }
            _ => false,
        }
    }

    fn is_subheading(&self, line: &str) -> bool {
        if line.ends_with(':') {
            return true;
        }

        let has_pipe = line.contains('|');
        if has_pipe && (line.contains("20") || line.contains("19")) {
            return true;
        }

        if line.chars().count() >= self.config.subheading_max_len {
            return false;
        }

        (self.config.loose_subheadings && has_pipe)
            || self
                .config
                .date_pattern
                .as_ref()
                .is_some_and(|re| re.is_match(line))
    }

    fn bullet_marker(&self, line: &str) -> Option<char> {
        line.chars()
            .next()
            .filter(|c| self.config.bullet_markers.contains(c))
    }

    fn is_contact(&self, line: &str) -> bool {
        line.contains('@')
            || (line.contains('(') && line.contains(')'))
            || self
                .config
                .phone_pattern
                .as_ref()
                .is_some_and(|re| re.is_match(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(line: &str, index: usize) -> Role {
        Classifier::default().role_of(line, index)
    }

    #[test]
    fn test_heading_all_caps() {
        assert_eq!(role("EDUCATION", 3), Role::Heading);
        assert_eq!(role("EDUCATION", 0), Role::Heading);
        assert_eq!(role("TECHNICAL SKILLS & TOOLS", 2), Role::Heading);
        assert_eq!(role("Education", 3), Role::Paragraph);
    }

    #[test]
    fn test_heading_rejects_contact_punctuation() {
        assert_eq!(role("JANE@EXAMPLE.COM", 1), Role::Contact);
        assert_eq!(role("ACME (REMOTE)", 1), Role::Contact);
        assert_ne!(role("ACME | 2020", 1), Role::Heading);
    }

    #[test]
    fn test_caseless_lines_are_headings() {
        let lines = classify("JANE DOE\n2019 - 2023\n=====");
        assert_eq!(lines[1], ClassifiedLine::heading("2019 - 2023"));
        assert_eq!(lines[2], ClassifiedLine::heading("====="));
        assert_eq!(role("555-123-4567", 1), Role::Heading);
    }

    #[test]
    fn test_heading_requires_letter_opt_in() {
        let config = ClassifierConfig::default().with_heading_requires_letter(true);
        let classifier = Classifier::new(config);
        assert_eq!(classifier.role_of("=====", 1), Role::Paragraph);
        assert_eq!(classifier.role_of("2019 - 2023", 1), Role::Paragraph);
        assert_eq!(classifier.role_of("555-123-4567", 1), Role::Contact);
    }

    #[test]
    fn test_keyword_heading_up_to_80_chars() {
        let line = "PROFESSIONAL EXPERIENCE IN DISTRIBUTED SYSTEMS AND PLATFORM ENGINEERING";
        assert!(line.len() >= 50 && line.len() < 80);
        assert_eq!(role(line, 4), Role::Heading);
        assert_eq!(Classifier::strict().role_of(line, 4), Role::Paragraph);
    }

    #[test]
    fn test_keyword_heading_excludes_colon() {
        let line = "PROFESSIONAL EXPERIENCE IN DISTRIBUTED SYSTEMS: PLATFORM ENGINEERING";
        assert!(line.chars().count() >= 50);
        assert_eq!(role(line, 4), Role::Paragraph);
    }

    #[test]
    fn test_short_heading_allows_colon() {
        assert_eq!(role("SKILLS:", 4), Role::Heading);
    }

    #[test]
    fn test_subheading_pipe_and_year() {
        assert_eq!(
            role("Senior Engineer | Acme Corp | 2020", 1),
            Role::Subheading
        );
        assert_eq!(
            Classifier::strict().role_of("Senior Engineer | Acme Corp | 2020", 1),
            Role::Subheading
        );
    }

    #[test]
    fn test_subheading_trailing_colon() {
        assert_eq!(role("Languages and frameworks:", 5), Role::Subheading);
    }

    #[test]
    fn test_subheading_month_name() {
        assert_eq!(role("Backend Developer, Jan 2019 - Mar 2021", 2), Role::Subheading);
        assert_eq!(
            Classifier::strict().role_of("Backend Developer, Jan 2019 - Mar 2021", 2),
            Role::Paragraph
        );
    }

    #[test]
    fn test_first_line_never_subheading() {
        assert_eq!(role("Senior Engineer | Acme Corp | 2020", 0), Role::Paragraph);
        assert_eq!(role("Jane Doe | jane@example.com | 2024", 0), Role::Contact);
        assert_eq!(role("Contact details:", 0), Role::Paragraph);
    }

    #[test]
    fn test_bullet_marker_stripped() {
        let line = Classifier::default().classify_line("• Led a team of 5 engineers", 3);
        assert_eq!(line, ClassifiedLine::bullet("Led a team of 5 engineers"));

        let dash = Classifier::default().classify_line("- Cut build times by 40%", 3);
        assert_eq!(dash, ClassifiedLine::bullet("Cut build times by 40%"));
    }

    #[test]
    fn test_bullet_not_subheading() {
        let line = Classifier::default().classify_line("• Promoted in Jan 2021 | 2021", 3);
        assert_eq!(line.role, Role::Bullet);
    }

    #[test]
    fn test_contact() {
        assert_eq!(role("jane@example.com", 0), Role::Contact);
        assert_eq!(role("Phone (555) 123-4567", 1), Role::Contact);
        assert_eq!(role("Call 555.123.4567 anytime", 1), Role::Paragraph);
        assert_eq!(
            role("Reduced ticket volume for account 5551234567 by half", 1),
            Role::Paragraph
        );
        // A bare number upper-cases to itself, so it only reaches the phone
        // rule once headings need a letter.
        let lettered =
            Classifier::new(ClassifierConfig::default().with_heading_requires_letter(true));
        assert_eq!(lettered.role_of("555.123.4567", 1), Role::Contact);
    }

    #[test]
    fn test_paragraph_fallback() {
        assert_eq!(
            role("Engineer with ten years of experience building APIs.", 2),
            Role::Paragraph
        );
    }

    #[test]
    fn test_classify_drops_blank_lines() {
        let lines = classify("JANE DOE\n\n  \njane@example.com\r\nSUMMARY\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].role, Role::Heading);
        assert_eq!(lines[1].role, Role::Contact);
        assert_eq!(lines[2].role, Role::Heading);
    }

    #[test]
    fn test_index_counts_non_empty_lines() {
        // The pipe line is the second non-empty line even though a blank
        // line precedes it.
        let lines = classify("\n\nJANE DOE\n\nEngineer | Acme | 2020");
        assert_eq!(lines[1].role, Role::Subheading);

        let lines = classify("\n\nEngineer | Acme | 2020");
        assert_eq!(lines[0].role, Role::Paragraph);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let text = "JANE DOE\njane@example.com\nEXPERIENCE\nDev | Acme | 2020\n• Built things";
        assert_eq!(classify(text), classify(text));
    }
}
