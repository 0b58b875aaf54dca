//! Styled markup rendering for word-processor and print targets.
//!
//! Both targets share one role style table and differ only in the document
//! shell: the word-processor target declares the Office namespaces and a
//! letter-size `@page`, the print target is a plain HTML5 page with print
//! rules. Content is HTML-escaped.

use html_escape::encode_double_quoted_attribute as escape;

use crate::model::{ClassifiedLine, Role};

use super::{RenderMeta, RenderOptions};

/// Which consumer the markup is shaped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupTarget {
    /// HTML that word processors open as a document (`.doc`)
    Word,
    /// Browser page intended for printing
    Print,
}

/// Render classified lines as a styled markup document.
pub fn to_markup(
    lines: &[ClassifiedLine],
    target: MarkupTarget,
    meta: &RenderMeta,
    options: &RenderOptions,
) -> String {
    let body = lines
        .iter()
        .map(|line| render_line(line, &options.font_family))
        .collect::<Vec<_>>()
        .join("\n");

    let body = if options.include_shell {
        format!(
            "{}\n{}\n{}",
            header(meta, &options.font_family),
            body,
            footer(meta, &options.font_family)
        )
    } else {
        body
    };

    match target {
        MarkupTarget::Word => word_document(&body, meta, &options.font_family),
        MarkupTarget::Print => print_document(&body, meta, &options.font_family),
    }
}

/// Inline style for a role.
pub fn role_style(role: Role, font_family: &str) -> String {
    let style = match role {
        Role::Heading => "font-size: 16pt; font-weight: bold; color: #111827; margin: 0 0 16pt 0; padding-bottom: 8pt; border-bottom: 2pt solid #d1d5db; text-transform: uppercase; letter-spacing: 0.05em;",
        Role::Subheading => "font-size: 14pt; font-weight: 600; color: #1f2937; margin: 16pt 0 8pt 0;",
        Role::Bullet => "margin: 4pt 0 4pt 16pt; text-indent: -8pt; color: #374151; font-size: 11pt; line-height: 1.5;",
        Role::Contact => "margin: 4pt 0; color: #4b5563; font-size: 10pt;",
        Role::Paragraph => "margin: 8pt 0; color: #374151; font-size: 11pt; line-height: 1.5;",
    };
    format!("{} font-family: {};", style, font_family)
}

const BULLET_MARKER: &str = r#"<span style="color: #2563eb; font-weight: bold;">• </span>"#;

fn render_line(line: &ClassifiedLine, font_family: &str) -> String {
    let style = role_style(line.role, font_family);
    let style = escape(&style);
    let content = escape(&line.content);

    match line.role {
        Role::Heading => format!(r#"<h1 style="{}">{}</h1>"#, style, content),
        Role::Subheading => format!(r#"<h2 style="{}">{}</h2>"#, style, content),
        Role::Bullet => format!(r#"<p style="{}">{}{}</p>"#, style, BULLET_MARKER, content),
        Role::Contact | Role::Paragraph => format!(r#"<p style="{}">{}</p>"#, style, content),
    }
}

fn header(meta: &RenderMeta, font_family: &str) -> String {
    format!(
        r#"<div class="resume-header" style="margin: 0 0 16pt 0; color: #6b7280; font-size: 9pt; font-family: {};">{} - Tailored Resume</div>"#,
        font_family,
        escape(meta.display_title())
    )
}

fn footer(meta: &RenderMeta, font_family: &str) -> String {
    format!(
        r#"<div class="resume-footer" style="margin: 24pt 0 0 0; padding-top: 8pt; border-top: 1pt solid #e5e7eb; color: #9ca3af; font-size: 8pt; font-family: {};">Generated {}</div>"#,
        font_family,
        meta.timestamp()
    )
}

fn word_document(body: &str, meta: &RenderMeta, font_family: &str) -> String {
    format!(
        r#"<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>
<head>
<meta charset='utf-8'>
<title>{title}</title>
<style>
@page {{ size: 8.5in 11in; margin: 1in 1in 1in 1in; }}
body {{ font-family: {font}; font-size: 11pt; line-height: 1.5; margin: 0; padding: 0; color: #374151; background-color: #ffffff; }}
h1, h2, h3 {{ margin-top: 0; font-family: {font}; }}
p {{ margin: 0; font-family: {font}; }}
</style>
</head>
<body>
<div style="background-color: #ffffff; padding: 24pt;">
{body}
</div>
</body>
</html>
"#,
        title = escape(meta.display_title()),
        font = font_family,
        body = body
    )
}

fn print_document(body: &str, meta: &RenderMeta, font_family: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
@page {{ size: letter; margin: 0.75in; }}
body {{ font-family: {font}; font-size: 11pt; line-height: 1.5; color: #374151; background: #ffffff; max-width: 7in; margin: 0 auto; }}
h1, h2 {{ page-break-after: avoid; break-after: avoid; }}
p {{ orphans: 2; widows: 2; }}
@media print {{ body {{ max-width: none; }} .resume-header, .resume-footer {{ color: #6b7280; }} }}
</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(meta.display_title()),
        font = font_family,
        body = body
    )
}
