//! Webhook tailoring service.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

use super::{TailorRequest, TailoredText, TailoringService};

/// Response fields checked, in order, for the tailored resume.
const RESULT_FIELDS: [&str; 3] = ["tailoredResume", "aiResume", "result"];

/// Posts the request to a workflow webhook and reads the tailored resume
/// from its response.
#[derive(Debug, Clone)]
pub struct WebhookTailor {
    client: Client,
    url: String,
    user_agent: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookPayload<'a> {
    resume: &'a str,
    job_description: &'a str,
    job_title: &'a str,
    timestamp: String,
}

impl WebhookTailor {
    pub fn new(client: Client, url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TailoringService for WebhookTailor {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn tailor(&self, request: &TailorRequest) -> Result<TailoredText> {
        let payload = WebhookPayload {
            resume: &request.resume,
            job_description: &request.job_description,
            job_title: request.job_title_or_default(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        log::debug!("Posting tailoring request to webhook {}", self.url);
        let resp = self
            .client
            .post(&self.url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Tailoring(format!(
                "webhook returned HTTP {}",
                status.as_u16()
            )));
        }

        let body = resp.text().await?;
        let text = extract_result(&body)
            .ok_or_else(|| Error::Tailoring("webhook response held no resume".to_string()))?;
        Ok(TailoredText::new(text))
    }
}

/// Pull the tailored resume out of a webhook response body.
///
/// JSON objects are searched for the known result fields; a bare JSON string
/// is taken as-is; anything that is not JSON is treated as the resume text.
fn extract_result(body: &str) -> Option<String> {
    let text = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => RESULT_FIELDS
            .iter()
            .find_map(|field| match map.get(*field) {
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
                _ => None,
            })?,
        Ok(Value::String(s)) => s,
        Ok(_) => return None,
        Err(_) => body.to_string(),
    };

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_field_priority() {
        let body = r#"{"result":"third","aiResume":"second","tailoredResume":"first"}"#;
        assert_eq!(extract_result(body).as_deref(), Some("first"));

        let body = r#"{"result":"third","aiResume":"second"}"#;
        assert_eq!(extract_result(body).as_deref(), Some("second"));

        let body = r#"{"result":"  third  "}"#;
        assert_eq!(extract_result(body).as_deref(), Some("third"));
    }

    #[test]
    fn test_extract_skips_blank_fields() {
        let body = r#"{"tailoredResume":"","result":"fallback"}"#;
        assert_eq!(extract_result(body).as_deref(), Some("fallback"));
    }

    #[test]
    fn test_extract_plain_bodies() {
        assert_eq!(extract_result(r#""JANE DOE""#).as_deref(), Some("JANE DOE"));
        assert_eq!(
            extract_result("JANE DOE\nEngineer").as_deref(),
            Some("JANE DOE\nEngineer")
        );
    }

    #[test]
    fn test_extract_nothing_usable() {
        assert_eq!(extract_result(r#"{"status":"ok"}"#), None);
        assert_eq!(extract_result("[1,2]"), None);
        assert_eq!(extract_result("   "), None);
    }

    #[test]
    fn test_payload_shape() {
        let request = TailorRequest::new("resume", "job");
        let payload = WebhookPayload {
            resume: &request.resume,
            job_description: &request.job_description,
            job_title: request.job_title_or_default(),
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["jobDescription"], "job");
        assert_eq!(value["jobTitle"], "Position");
        assert_eq!(value["timestamp"], "2024-01-01T00:00:00.000Z");
    }
}
