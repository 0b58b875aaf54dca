//! Text run collection and line reconstruction.
//!
//! A PDF page is a bag of positioned text fragments with no notion of lines.
//! This module walks a decoded content stream to collect those fragments as
//! [`TextRun`]s, then rebuilds reading-order lines from their coordinates.

use super::backend::{get_number_from_value, ContentOp, PdfValue};

/// A fragment of text placed at a baseline position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline, PDF user space, grows upwards)
    pub y: f32,
    /// Approximate advance width
    pub width: f32,
    /// Approximate glyph height
    pub height: f32,
    /// Effective font size in points
    pub font_size: f32,
}

impl TextRun {
    /// Create a run, estimating width and height from the font size.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        let text = text.into();
        // Half an em per glyph is close enough for ordering purposes.
        let width = text.chars().count() as f32 * font_size * 0.5;
        Self {
            text,
            x,
            y,
            width,
            height: font_size,
            font_size,
        }
    }

    /// Right edge (approximate).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Collect positioned text runs from content stream operations.
///
/// `decode` turns a string operand into text given the active font resource
/// name; backends use it to apply the font's encoding.
pub fn collect_runs<F>(ops: &[ContentOp], mut decode: F) -> Vec<TextRun>
where
    F: FnMut(&[u8], &[u8]) -> String,
{
    let mut runs = Vec::new();
    let mut font_name: Vec<u8> = Vec::new();
    let mut font_size: f32 = 12.0;
    let mut matrix = TextMatrix::default();
    let mut in_text_block = false;

    for op in ops {
        match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                matrix.reset();
            }
            "ET" => {
                in_text_block = false;
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let PdfValue::Name(name) = &op.operands[0] {
                        font_name = name.clone();
                    }
                    font_size = get_number_from_value(&op.operands[1]).unwrap_or(12.0);
                }
            }
            "TL" => {
                if let Some(leading) = op.operands.first().and_then(get_number_from_value) {
                    matrix.leading = leading;
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = get_number_from_value(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number_from_value(&op.operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        matrix.leading = -ty;
                    }
                    matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    let n = |i: usize, default: f32| {
                        get_number_from_value(&op.operands[i]).unwrap_or(default)
                    };
                    matrix.set(n(0, 1.0), n(1, 0.0), n(2, 0.0), n(3, 1.0), n(4, 0.0), n(5, 0.0));
                }
            }
            "T*" => {
                matrix.next_line();
            }
            "Tj" if in_text_block => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = decode(&font_name, bytes);
                    push_run(&mut runs, text, &matrix, font_size);
                }
            }
            "TJ" if in_text_block => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = combine_tj(items, |bytes| decode(&font_name, bytes));
                    push_run(&mut runs, text, &matrix, font_size);
                }
            }
            "'" | "\"" => {
                matrix.next_line();
                if in_text_block {
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(PdfValue::Str(bytes)) = op.operands.get(text_idx) {
                        let text = decode(&font_name, bytes);
                        push_run(&mut runs, text, &matrix, font_size);
                    }
                }
            }
            _ => {}
        }
    }

    runs
}

fn push_run(runs: &mut Vec<TextRun>, text: String, matrix: &TextMatrix, font_size: f32) {
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = matrix.position();
    runs.push(TextRun::new(text, x, y, font_size * matrix.scale()));
}

/// Join the pieces of a `TJ` array.
///
/// Numbers are kerning adjustments in thousandths of an em; a large negative
/// adjustment is how many producers encode a word space.
fn combine_tj<F>(items: &[PdfValue], mut decode: F) -> String
where
    F: FnMut(&[u8]) -> String,
{
    const SPACE_THRESHOLD: f32 = 200.0;

    let mut combined = String::new();
    for item in items {
        match item {
            PdfValue::Str(bytes) => combined.push_str(&decode(bytes)),
            PdfValue::Integer(_) | PdfValue::Real(_) => {
                let adjustment = -get_number_from_value(item).unwrap_or(0.0);
                if adjustment > SPACE_THRESHOLD
                    && !combined.ends_with(' ')
                    && !combined.ends_with('\u{00A0}')
                {
                    if let Some(c) = combined.chars().last() {
                        if !is_spaceless_script_char(c) {
                            combined.push(' ');
                        }
                    }
                }
            }
            _ => {}
        }
    }
    combined
}

/// Trim a run and collapse internal whitespace to single spaces.
pub fn normalize_run_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rebuild reading-order lines from positioned runs.
///
/// Runs are normalized (empty ones dropped) and sorted top of page first.
/// A run whose baseline is within `tolerance` of the previous run continues
/// the current line; otherwise it starts a new one. Within a line runs are
/// ordered left to right and joined with a single space. Lines are joined
/// with `\n`.
pub fn reconstruct_lines(runs: Vec<TextRun>, tolerance: f32) -> String {
    let mut runs: Vec<TextRun> = runs
        .into_iter()
        .filter_map(|mut run| {
            run.text = normalize_run_text(&run.text);
            (!run.text.is_empty()).then_some(run)
        })
        .collect();

    runs.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines: Vec<Vec<TextRun>> = Vec::new();
    let mut last_y: Option<f32> = None;

    for run in runs {
        match (last_y, lines.last_mut()) {
            (Some(y), Some(line)) if (run.y - y).abs() <= tolerance => {
                last_y = Some(run.y);
                line.push(run);
            }
            _ => {
                last_y = Some(run.y);
                lines.push(vec![run]);
            }
        }
    }

    log::debug!("Reconstructed {} lines", lines.len());

    lines
        .into_iter()
        .map(join_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_line(mut runs: Vec<TextRun>) -> String {
    runs.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut text = String::new();
    for run in runs {
        let glue = match (text.chars().last(), run.text.chars().next()) {
            (Some(prev), Some(next)) => {
                !(is_spaceless_script_char(prev) && is_spaceless_script_char(next))
            }
            _ => false,
        };
        if glue {
            text.push(' ');
        }
        text.push_str(&run.text);
    }
    text
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    fn reset(&mut self) {
        let leading = self.leading;
        *self = Self {
            leading,
            ..Self::default()
        };
    }

    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
pub(crate) fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions A-F
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    || (0x20000..=0x2A6DF).contains(&code)
    || (0x2A700..=0x2B73F).contains(&code)
    || (0x2B740..=0x2B81F).contains(&code)
    || (0x2B820..=0x2CEAF).contains(&code)
    || (0x2CEB0..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x309F).contains(&code)
    || (0x30A0..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
