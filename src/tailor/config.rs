//! Tailoring service configuration.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::error::Result;

use super::chat::{DEFAULT_CHAT_ENDPOINT, DEFAULT_CHAT_MODEL};
use super::{
    ChatCompletionTailor, DisabledStore, HttpResumeStore, ResumeStore, TailorChain, WebhookTailor,
};

/// User agent sent to tailoring and storage endpoints.
pub const DEFAULT_USER_AGENT: &str = concat!("resume-tailor/", env!("CARGO_PKG_VERSION"));

/// Where tailoring requests go and where results are saved.
///
/// A webhook, when set, is tried first; the chat-completion API is the
/// fallback whenever an API key is present. Without a store URL results are
/// not saved.
#[derive(Debug, Clone, PartialEq)]
pub struct TailorConfig {
    pub webhook_url: Option<String>,
    pub api_key: Option<String>,
    pub chat_endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub store_url: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TailorConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            api_key: None,
            chat_endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            max_tokens: 2000,
            temperature: 0.7,
            store_url: None,
            timeout: Duration::from_secs(120),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl TailorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = non_blank(url.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = non_blank(key.into());
        self
    }

    pub fn with_chat_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.chat_endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_store_url(mut self, url: impl Into<String>) -> Self {
        self.store_url = non_blank(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Whether any tailoring service is configured.
    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some() || self.api_key.is_some()
    }

    /// Build the HTTP client shared by the services.
    pub fn http_client(&self) -> Result<Client> {
        Ok(Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()?)
    }

    /// Build the service chain: webhook first, then chat completion.
    pub fn build_chain(&self, client: &Client) -> TailorChain {
        let mut chain = TailorChain::new();

        if let Some(url) = &self.webhook_url {
            chain = chain.with_service(Arc::new(WebhookTailor::new(
                client.clone(),
                url,
                &self.user_agent,
            )));
        }

        if let Some(key) = &self.api_key {
            let chat = ChatCompletionTailor::new(client.clone(), key)
                .with_endpoint(&self.chat_endpoint)
                .with_model(&self.model)
                .with_max_tokens(self.max_tokens)
                .with_temperature(self.temperature);
            chain = chain.with_service(Arc::new(chat));
        }

        chain
    }

    /// Build the store: HTTP when a URL is set, otherwise disabled.
    pub fn build_store(&self, client: &Client) -> Arc<dyn ResumeStore> {
        match &self.store_url {
            Some(url) => Arc::new(HttpResumeStore::new(client.clone(), url)),
            None => Arc::new(DisabledStore),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
