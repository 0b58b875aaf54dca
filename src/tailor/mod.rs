//! Tailoring boundary: remote services that rewrite a resume for a job.
//!
//! The library does not tailor anything itself. It validates a
//! [`TailorRequest`], hands it to a [`TailoringService`] (webhook,
//! chat-completion API, or a chain of both), and stores the result through a
//! best-effort [`ResumeStore`]. The returned text feeds straight back into
//! the line classifier.

mod chain;
mod chat;
mod config;
mod store;
mod webhook;

pub use chain::TailorChain;
pub use chat::{strip_commentary, tailoring_prompt, ChatCompletionTailor, SYSTEM_PROMPT};
pub use config::TailorConfig;
pub use store::{
    DisabledStore, HttpResumeStore, ResumeRecord, ResumeStore, SavedResume, LOCAL_ONLY_ID,
};
pub use webhook::WebhookTailor;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::classify::Classifier;
use crate::error::{Error, Result};
use crate::model::ClassifiedLine;

/// Job title sent when the user gave none.
pub const DEFAULT_JOB_TITLE: &str = "Position";

/// A resume and the job it should be tailored for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorRequest {
    pub resume: String,
    pub job_description: String,
    pub job_title: Option<String>,
}

impl TailorRequest {
    /// Create a request.
    pub fn new(resume: impl Into<String>, job_description: impl Into<String>) -> Self {
        Self {
            resume: resume.into(),
            job_description: job_description.into(),
            job_title: None,
        }
    }

    /// Set the job title.
    pub fn with_job_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.job_title = (!title.trim().is_empty()).then_some(title);
        self
    }

    /// Job title, or [`DEFAULT_JOB_TITLE`].
    pub fn job_title_or_default(&self) -> &str {
        self.job_title.as_deref().unwrap_or(DEFAULT_JOB_TITLE)
    }

    /// Reject requests without a resume or job description.
    pub fn validate(&self) -> Result<()> {
        if self.resume.trim().is_empty() || self.job_description.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "Resume and job description are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resume text returned by a tailoring service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailoredText(String);

impl TailoredText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for TailoredText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A remote service that tailors resumes.
#[async_trait]
pub trait TailoringService: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Tailor the resume in `request`.
    async fn tailor(&self, request: &TailorRequest) -> Result<TailoredText>;
}

/// Result of a tailoring round trip.
#[derive(Debug, Clone)]
pub struct TailorOutcome {
    /// The tailored resume
    pub tailored: TailoredText,

    /// Identifier assigned by the store, if saving succeeded
    pub record_id: Option<String>,
}

impl TailorOutcome {
    /// Classify the tailored text for rendering.
    pub fn lines(&self, classifier: &Classifier) -> Vec<ClassifiedLine> {
        classifier.classify(self.tailored.as_str())
    }
}

/// One user's tailoring session.
///
/// Allows a single request in flight at a time; a second submission while
/// one is pending fails with [`Error::Busy`]. Saving happens only after a
/// successful tailoring, and a failed save is logged, never returned.
pub struct TailoringSession {
    service: Arc<dyn TailoringService>,
    store: Arc<dyn ResumeStore>,
    user_id: String,
    busy: AtomicBool,
}

impl TailoringSession {
    /// Create a session for `user_id`.
    pub fn new(
        service: Arc<dyn TailoringService>,
        store: Arc<dyn ResumeStore>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            service,
            store,
            user_id: user_id.into(),
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Tailor a resume and save the result.
    pub async fn submit(&self, request: &TailorRequest) -> Result<TailorOutcome> {
        request.validate()?;

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        log::info!(
            "Tailoring resume for {} via {}",
            request.job_title_or_default(),
            self.service.name()
        );
        let tailored = self.service.tailor(request).await?;
        if tailored.is_empty() {
            return Err(Error::Tailoring(
                "the service returned an empty resume".to_string(),
            ));
        }

        let record = ResumeRecord::new(&self.user_id, request, &tailored);
        let record_id = match self.store.save(&record).await {
            Ok(id) => {
                log::debug!("Saved tailored resume as {}", id);
                Some(id)
            }
            Err(e) => {
                log::warn!("Failed to save tailored resume, continuing: {}", e);
                None
            }
        };

        Ok(TailorOutcome {
            tailored,
            record_id,
        })
    }
}

/// Clears the busy flag when the request finishes, however it finishes.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
