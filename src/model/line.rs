//! Role-tagged resume lines.

use serde::{Deserialize, Serialize};

/// Semantic role of a resume line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Section title such as EXPERIENCE or EDUCATION
    Heading,
    /// Job title, education entry, or other dated/labelled line
    Subheading,
    /// List item; the marker is stripped from the content
    Bullet,
    /// Email, phone, or other contact detail
    Contact,
    /// Anything else
    Paragraph,
}

impl Role {
    /// Outline level: 1 for headings, 2 for subheadings.
    pub fn level(&self) -> Option<u8> {
        match self {
            Role::Heading => Some(1),
            Role::Subheading => Some(2),
            _ => None,
        }
    }

    /// Lowercase name, as used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Heading => "heading",
            Role::Subheading => "subheading",
            Role::Bullet => "bullet",
            Role::Contact => "contact",
            Role::Paragraph => "paragraph",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line of resume text with its classified role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    pub role: Role,
    pub content: String,
}

impl ClassifiedLine {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn heading(content: impl Into<String>) -> Self {
        Self::new(Role::Heading, content)
    }

    pub fn subheading(content: impl Into<String>) -> Self {
        Self::new(Role::Subheading, content)
    }

    pub fn bullet(content: impl Into<String>) -> Self {
        Self::new(Role::Bullet, content)
    }

    pub fn contact(content: impl Into<String>) -> Self {
        Self::new(Role::Contact, content)
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::new(Role::Paragraph, content)
    }
}
