//! Plain text rendering for classified resume lines.

use crate::model::{ClassifiedLine, Role};

use super::{collapse_blank_lines, RenderOptions};

/// Render classified lines as plain text.
///
/// Headings are underlined with `=` to their full width, subheadings with
/// `-` up to `underline_cap` characters, and bullets get a `•` marker.
pub fn to_plain_text(lines: &[ClassifiedLine], options: &RenderOptions) -> String {
    let items: Vec<String> = lines
        .iter()
        .map(|line| render_line(line, options))
        .collect();

    collapse_blank_lines(&items.join("\n")).trim().to_string()
}

fn render_line(line: &ClassifiedLine, options: &RenderOptions) -> String {
    let content = &line.content;
    let width = content.chars().count();

    match line.role {
        Role::Heading => format!("\n{}\n{}\n", content, "=".repeat(width)),
        Role::Subheading => format!(
            "\n{}\n{}\n",
            content,
            "-".repeat(width.min(options.underline_cap))
        ),
        Role::Bullet => format!("• {}", content),
        Role::Contact => content.clone(),
        Role::Paragraph => format!("\n{}\n", content),
    }
}
