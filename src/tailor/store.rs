//! Best-effort persistence of tailored resumes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

use super::{TailorRequest, TailoredText};

/// Identifier returned when saving is disabled.
pub const LOCAL_ONLY_ID: &str = "local-only";

/// Job title stored when the request had none.
const UNTITLED_POSITION: &str = "Untitled Position";

/// A tailored resume together with what produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub user_id: String,
    pub tailored_resume: String,
    pub job_title: String,
    pub original_resume: String,
    pub job_description: String,
}

impl ResumeRecord {
    pub fn new(user_id: &str, request: &TailorRequest, tailored: &TailoredText) -> Self {
        Self {
            user_id: user_id.to_string(),
            tailored_resume: tailored.as_str().to_string(),
            job_title: request
                .job_title
                .clone()
                .unwrap_or_else(|| UNTITLED_POSITION.to_string()),
            original_resume: request.resume.clone(),
            job_description: request.job_description.clone(),
        }
    }
}

/// A previously saved resume, as listed back for its owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResume {
    pub id: Option<String>,
    pub job_title: String,
    pub tailored_resume: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Somewhere tailored resumes can be saved.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Save a record and return its identifier.
    async fn save(&self, record: &ResumeRecord) -> Result<String>;

    /// A user's saved resumes, newest first.
    async fn list(&self, user_id: &str) -> Result<Vec<SavedResume>>;
}

/// Store that saves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStore;

#[async_trait]
impl ResumeStore for DisabledStore {
    async fn save(&self, _record: &ResumeRecord) -> Result<String> {
        log::debug!("Resume saving disabled");
        Ok(LOCAL_ONLY_ID.to_string())
    }

    async fn list(&self, _user_id: &str) -> Result<Vec<SavedResume>> {
        Ok(Vec::new())
    }
}

/// Store backed by an HTTP endpoint that answers `{"success": true, "id": ...}`.
#[derive(Debug, Clone)]
pub struct HttpResumeStore {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    resumes: Vec<ListedResume>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedResume {
    #[serde(rename = "_id", alias = "id", default)]
    id: Option<Value>,
    #[serde(default)]
    job_title: Option<String>,
    #[serde(default)]
    tailored_resume: String,
    #[serde(default)]
    created_at: Option<Value>,
}

impl From<ListedResume> for SavedResume {
    fn from(listed: ListedResume) -> Self {
        Self {
            id: listed.id.and_then(record_id),
            job_title: listed
                .job_title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| UNTITLED_POSITION.to_string()),
            tailored_resume: listed.tailored_resume,
            created_at: listed.created_at.and_then(timestamp),
        }
    }
}

fn default_success() -> bool {
    true
}

impl HttpResumeStore {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ResumeStore for HttpResumeStore {
    async fn save(&self, record: &ResumeRecord) -> Result<String> {
        if record.user_id.is_empty() || record.tailored_resume.is_empty() {
            return Err(Error::Persistence(
                "Missing required fields: userId and tailoredResume".to_string(),
            ));
        }

        let resp = self.client.post(&self.url).json(record).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        let parsed: Option<SaveResponse> = serde_json::from_str(&body).ok();
        if !status.is_success() {
            let detail = parsed
                .and_then(|r| r.error)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(Error::Persistence(detail));
        }

        let parsed = parsed
            .ok_or_else(|| Error::Persistence("unreadable save response".to_string()))?;
        if !parsed.success {
            return Err(Error::Persistence(
                parsed.error.unwrap_or_else(|| "save rejected".to_string()),
            ));
        }

        parsed
            .id
            .and_then(record_id)
            .ok_or_else(|| Error::Persistence("save response carried no id".to_string()))
    }

    async fn list(&self, user_id: &str) -> Result<Vec<SavedResume>> {
        if user_id.trim().is_empty() {
            return Err(Error::Persistence("Missing userId".to_string()));
        }

        let resp = self
            .client
            .get(&self.url)
            .query(&[("userId", user_id)])
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        let parsed: Option<ListResponse> = serde_json::from_str(&body).ok();
        if !status.is_success() {
            let detail = parsed
                .and_then(|r| r.error)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(Error::Persistence(detail));
        }

        let parsed = parsed
            .ok_or_else(|| Error::Persistence("unreadable list response".to_string()))?;
        if !parsed.success {
            return Err(Error::Persistence(
                parsed.error.unwrap_or_else(|| "listing rejected".to_string()),
            ));
        }

        log::debug!("Listed {} saved resumes", parsed.resumes.len());
        Ok(parsed.resumes.into_iter().map(SavedResume::from).collect())
    }
}

/// Identifiers may come back as strings, numbers, or `{"$oid": ...}` objects.
fn record_id(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("$oid").and_then(|v| v.as_str()).map(str::to_string),
        _ => None,
    }
}

/// Timestamps come back as RFC 3339 strings or `{"$date": ...}` objects.
fn timestamp(value: Value) -> Option<DateTime<Utc>> {
    let text = match value {
        Value::String(s) => s,
        Value::Object(mut map) => match map.remove("$date")? {
            Value::String(s) => s,
            _ => return None,
        },
        _ => return None,
    };
    DateTime::parse_from_rfc3339(&text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_defaults_title() {
        let request = TailorRequest::new("orig", "job");
        let record = ResumeRecord::new("u1", &request, &TailoredText::new("new"));
        assert_eq!(record.job_title, "Untitled Position");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["tailoredResume"], "new");
        assert_eq!(value["originalResume"], "orig");
        assert_eq!(value["jobDescription"], "job");
    }

    #[test]
    fn test_record_id_shapes() {
        assert_eq!(record_id(json!("abc")), Some("abc".to_string()));
        assert_eq!(record_id(json!(17)), Some("17".to_string()));
        assert_eq!(
            record_id(json!({"$oid": "65a1"})),
            Some("65a1".to_string())
        );
        assert_eq!(record_id(json!("")), None);
        assert_eq!(record_id(json!(null)), None);
    }

    #[test]
    fn test_listed_resume_shapes() {
        let listed: ListedResume = serde_json::from_value(json!({
            "_id": {"$oid": "65f0c1"},
            "userId": "u1",
            "jobTitle": "",
            "tailoredResume": "JANE DOE",
            "createdAt": {"$date": "2024-03-01T10:00:00.000Z"}
        }))
        .unwrap();
        let saved = SavedResume::from(listed);
        assert_eq!(saved.id.as_deref(), Some("65f0c1"));
        assert_eq!(saved.job_title, "Untitled Position");
        assert_eq!(
            saved.created_at.map(|t| t.to_rfc3339()),
            Some("2024-03-01T10:00:00+00:00".to_string())
        );

        assert_eq!(timestamp(json!("not a date")), None);
        assert_eq!(timestamp(json!(1700000000)), None);
    }

    #[tokio::test]
    async fn test_disabled_store() {
        let request = TailorRequest::new("orig", "job");
        let record = ResumeRecord::new("u1", &request, &TailoredText::new("new"));
        assert_eq!(DisabledStore.save(&record).await.unwrap(), LOCAL_ONLY_ID);
        assert!(DisabledStore.list("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_http_store_rejects_missing_fields() {
        let store = HttpResumeStore::new(Client::new(), "http://127.0.0.1:9/save");
        let request = TailorRequest::new("orig", "job");
        let record = ResumeRecord::new("", &request, &TailoredText::new("new"));
        assert!(matches!(
            store.save(&record).await,
            Err(Error::Persistence(_))
        ));

        match store.list("  ").await {
            Err(Error::Persistence(msg)) => assert_eq!(msg, "Missing userId"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
