//! Ordered fallback across tailoring services.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::{TailorRequest, TailoredText, TailoringService};

/// Message returned when no tailoring service is configured.
pub(crate) const NOT_CONFIGURED: &str =
    "AI service not configured. Please check your API configuration.";

/// Tries each service in order and returns the first success.
#[derive(Clone, Default)]
pub struct TailorChain {
    services: Vec<Arc<dyn TailoringService>>,
}

impl TailorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a service to the end of the chain.
    pub fn with_service(mut self, service: Arc<dyn TailoringService>) -> Self {
        self.services.push(service);
        self
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Names of the services, in order.
    pub fn names(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.name()).collect()
    }
}

impl std::fmt::Debug for TailorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TailorChain")
            .field("services", &self.names())
            .finish()
    }
}

#[async_trait]
impl TailoringService for TailorChain {
    fn name(&self) -> &str {
        "chain"
    }

    async fn tailor(&self, request: &TailorRequest) -> Result<TailoredText> {
        let mut last_error = None;

        for service in &self.services {
            match service.tailor(request).await {
                Ok(text) if !text.is_empty() => return Ok(text),
                Ok(_) => {
                    log::warn!("{} returned an empty resume, trying next service", service.name());
                    last_error = Some(Error::Tailoring(format!(
                        "{} returned an empty resume",
                        service.name()
                    )));
                }
                Err(e) => {
                    log::warn!("{} failed, trying next service: {}", service.name(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Tailoring(NOT_CONFIGURED.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        name: &'static str,
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(name: &'static str, reply: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                name,
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TailoringService for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        async fn tailor(&self, _request: &TailorRequest) -> Result<TailoredText> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(text) => Ok(TailoredText::new(text)),
                None => Err(Error::Tailoring(format!("{} down", self.name))),
            }
        }
    }

    fn request() -> TailorRequest {
        TailorRequest::new("resume", "job")
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let first = Scripted::new("webhook", Some("FROM WEBHOOK"));
        let second = Scripted::new("chat", Some("FROM CHAT"));
        let chain = TailorChain::new()
            .with_service(first.clone())
            .with_service(second.clone());

        let text = chain.tailor(&request()).await.unwrap();
        assert_eq!(text.as_str(), "FROM WEBHOOK");
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_back_on_failure_and_empty() {
        let failing = Scripted::new("webhook", None);
        let empty = Scripted::new("blank", Some("  "));
        let working = Scripted::new("chat", Some("FROM CHAT"));
        let chain = TailorChain::new()
            .with_service(failing)
            .with_service(empty)
            .with_service(working);

        assert_eq!(chain.tailor(&request()).await.unwrap().as_str(), "FROM CHAT");
    }

    #[tokio::test]
    async fn test_all_fail_returns_last_error() {
        let chain = TailorChain::new()
            .with_service(Scripted::new("webhook", None))
            .with_service(Scripted::new("chat", None));

        match chain.tailor(&request()).await {
            Err(Error::Tailoring(msg)) => assert_eq!(msg, "chat down"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_chain_is_not_configured() {
        let chain = TailorChain::new();
        match chain.tailor(&request()).await {
            Err(Error::Tailoring(msg)) => assert_eq!(msg, NOT_CONFIGURED),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_debug_lists_names() {
        let chain = TailorChain::new().with_service(Scripted::new("webhook", None));
        assert_eq!(format!("{:?}", chain), r#"TailorChain { services: ["webhook"] }"#);
    }
}
