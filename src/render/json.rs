//! JSON rendering for classified resume lines.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::ClassifiedLine;

use super::RenderMeta;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDocument<'a> {
    title: Option<&'a str>,
    generated_at: DateTime<Utc>,
    lines: &'a [ClassifiedLine],
}

/// Convert classified lines to JSON.
pub fn to_json(lines: &[ClassifiedLine], meta: &RenderMeta, format: JsonFormat) -> Result<String> {
    let doc = JsonDocument {
        title: meta.title.as_deref(),
        generated_at: meta.generated_at,
        lines,
    };

    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&doc),
        JsonFormat::Compact => serde_json::to_string(&doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn meta() -> RenderMeta {
        RenderMeta::at(
            Some("Data Lead".to_string()),
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let lines = vec![ClassifiedLine::heading("SKILLS")];
        let json = to_json(&lines, &meta(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Data Lead\""));
        assert!(json.contains("\"role\": \"heading\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let lines = vec![ClassifiedLine::bullet("Shipped v2")];
        let json = to_json(&lines, &meta(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Data Lead","generatedAt":"2024-06-01T12:00:00Z","lines":[{"role":"bullet","content":"Shipped v2"}]}"#
        );
    }

    #[test]
    fn test_json_parses_back() {
        let lines = vec![
            ClassifiedLine::contact("jane@example.com"),
            ClassifiedLine::paragraph("Hello"),
        ];
        let json = to_json(&lines, &meta(), JsonFormat::Pretty).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let parsed: Vec<ClassifiedLine> = serde_json::from_value(value["lines"].clone()).unwrap();
        assert_eq!(parsed, lines);
    }
}
