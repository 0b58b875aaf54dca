//! Rendering module for turning classified lines into downloadable artifacts.
//!
//! Every renderer is a pure function of its inputs and emits each line
//! exactly once, in input order.

mod json;
mod markup;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use markup::{role_style, to_markup, MarkupTarget};
pub use options::{download_file_name, OutputFormat, RenderMeta, RenderOptions, DEFAULT_TITLE};
pub use text::to_plain_text;

pub(crate) use crate::extract::collapse_blank_lines;

use crate::error::Result;
use crate::model::ClassifiedLine;

/// A rendered artifact ready to be saved or served.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Artifact body
    pub content: String,

    /// Suggested file name
    pub file_name: String,

    /// MIME type of the body
    pub mime_type: &'static str,
}

/// Render classified lines in the requested format.
pub fn render(
    lines: &[ClassifiedLine],
    format: OutputFormat,
    meta: &RenderMeta,
    options: &RenderOptions,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(to_plain_text(lines, options)),
        OutputFormat::Word => Ok(to_markup(lines, MarkupTarget::Word, meta, options)),
        OutputFormat::Print => Ok(to_markup(lines, MarkupTarget::Print, meta, options)),
        OutputFormat::Json => to_json(lines, meta, options.json_format),
    }
}

/// Render and attach the download name and MIME type.
pub fn render_download(
    lines: &[ClassifiedLine],
    format: OutputFormat,
    meta: &RenderMeta,
    options: &RenderOptions,
) -> Result<Rendered> {
    let content = render(lines, format, meta, options)?;
    Ok(Rendered {
        content,
        file_name: download_file_name(meta.title.as_deref(), format),
        mime_type: format.mime_type(),
    })
}
