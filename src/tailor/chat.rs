//! OpenAI-compatible chat-completion tailoring service.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::{TailorRequest, TailoredText, TailoringService};

/// Default chat-completions endpoint.
pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// System message sent with every tailoring prompt.
pub const SYSTEM_PROMPT: &str = "You are a professional resume writer. Return only the tailored resume content without any commentary, advice, or explanatory text. Do not include phrases like \"This resume focuses on\" or \"Good luck with your application\" or any other guidance.";

/// Lowercased fragments that mark a line as advice rather than resume content.
const COMMENTARY_FRAGMENTS: &[&str] = &[
    "this resume",
    "this tailored resume",
    "good luck",
    "make sure to",
    "emphasizing",
    "aligns well",
    "further elaborate",
    "cover letter",
    "during interviews",
    "focuses on",
    "highlights your",
];

const COMMENTARY_PREFIXES: &[&str] = &["note:", "tip:"];

/// Tailors resumes through a chat-completions API.
#[derive(Debug, Clone)]
pub struct ChatCompletionTailor {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl ChatCompletionTailor {
    /// Create a client for the default endpoint and model.
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
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

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TailoringService for ChatCompletionTailor {
    fn name(&self) -> &str {
        "chat-completion"
    }

    async fn tailor(&self, request: &TailorRequest) -> Result<TailoredText> {
        let prompt = tailoring_prompt(request);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        log::debug!("Requesting tailoring from {} ({})", self.endpoint, self.model);
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Tailoring(format!(
                "chat API responded with status: {}",
                status.as_u16()
            )));
        }

        let data: ChatResponse = resp
            .json()
            .await
            .map_err(|e| Error::Tailoring(format!("unreadable chat response: {}", e)))?;

        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| Error::Tailoring("No response received from AI service".to_string()))?;

        Ok(TailoredText::new(strip_commentary(&content)))
    }
}

/// Build the user prompt for a tailoring request.
pub fn tailoring_prompt(request: &TailorRequest) -> String {
    format!(
        "You are an expert resume tailoring assistant. Please tailor the following resume for the specific job position.

Job Title: {title}

Job Description:
{description}

Original Resume:
{resume}

Instructions:
1. Tailor the resume to match the job requirements
2. Highlight relevant skills and experience
3. Use keywords from the job description
4. Maintain the original format and structure
5. Keep all factual information accurate
6. Make the resume more compelling for this specific role
7. IMPORTANT: Return ONLY the tailored resume content. Do not include any commentary, advice, or explanatory text.

Tailored Resume:",
        title = request.job_title_or_default(),
        description = request.job_description,
        resume = request.resume,
    )
}

/// Drop advice and commentary lines a model adds around the resume.
///
/// Blank lines go too; the remaining lines are joined with `\n`.
pub fn strip_commentary(text: &str) -> String {
    text.lines()
        .filter(|line| {
            let lower = line.trim().to_lowercase();
            !lower.is_empty()
                && !COMMENTARY_FRAGMENTS.iter().any(|f| lower.contains(f))
                && !COMMENTARY_PREFIXES.iter().any(|p| lower.starts_with(p))
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_commentary() {
        let reply = "JANE DOE\n\nEXPERIENCE\n• Built APIs\nThis resume focuses on backend work.\n\
Note: add metrics\nTIP: keep it short\nGood luck with your application!\n";
        assert_eq!(strip_commentary(reply), "JANE DOE\nEXPERIENCE\n• Built APIs");
    }

    #[test]
    fn test_strip_commentary_is_case_insensitive() {
        let reply = "SUMMARY\nEMPHASIZING leadership\nMentored five engineers";
        assert_eq!(strip_commentary(reply), "SUMMARY\nMentored five engineers");
    }

    #[test]
    fn test_strip_commentary_prefix_only_at_start() {
        let reply = "Release note: shipped v2";
        assert_eq!(strip_commentary(reply), "Release note: shipped v2");
    }

    #[test]
    fn test_prompt_sections() {
        let request = TailorRequest::new("JANE DOE", "Build Rust services");
        let prompt = tailoring_prompt(&request);
        assert!(prompt.contains("Job Title: Position\n"));
        assert!(prompt.contains("Job Description:\nBuild Rust services\n"));
        assert!(prompt.contains("Original Resume:\nJANE DOE\n"));
        assert!(prompt.contains("7. IMPORTANT: Return ONLY the tailored resume content."));
        assert!(prompt.ends_with("Tailored Resume:"));
    }

    #[test]
    fn test_request_body() {
        let body = ChatRequest {
            model: DEFAULT_CHAT_MODEL,
            messages: vec![ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT,
            }],
            max_tokens: 2000,
            temperature: 0.5,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["max_tokens"], 2000);
        assert_eq!(value["messages"][0]["role"], "system");
    }

    #[test]
    fn test_response_without_choices() {
        let data: ChatResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(data.choices.is_empty());
    }
}
