use std::time::Duration;

use bannerkb_model::{BannerRecord, BannerTags, SearchFilter};
use serde_json::json;
use thiserror::Error;

use crate::prompt;
use crate::types::{ApiErrorBody, ChatResponse};

#[derive(Debug, Error)]
pub enum AiError {
    #[error("no API key configured; set OPENAI_API_KEY or [ai] api_key in the config file")]
    MissingApiKey,
    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("AI API returned an error: {0}")]
    Api(String),
    #[error("could not parse AI response: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl AiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

/// Client for the two assistant calls: tag suggestion for a banner image and
/// trend summarization over search hits. Construction fails when no key is
/// present so misconfiguration surfaces before any network work happens.
#[derive(Debug)]
pub struct AiClient {
    http: reqwest::blocking::Client,
    config: AiConfig,
}

impl AiClient {
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::MissingApiKey);
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self { http, config })
    }

    /// Ask the model to classify a banner image against the fixed tag
    /// dictionaries. The image travels as a URL in a vision-style message.
    pub fn suggest_tags(
        &self,
        image_url: &str,
        extracted_text: Option<&str>,
    ) -> Result<BannerTags, AiError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": prompt::TAGGING_SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt::tagging_user_prompt(image_url, extracted_text) },
                        { "type": "image_url", "image_url": { "url": image_url } }
                    ]
                }
            ],
            "max_tokens": 500
        });
        let content = self.chat(body)?;
        let trimmed = strip_code_fence(&content);
        serde_json::from_str(trimmed).map_err(|e| AiError::Parse(format!("{e}: {trimmed}")))
    }

    /// Summarize why the top CTR hits for a search performed well, as
    /// copy-ready Japanese text for a sales deck.
    pub fn summarize_trends(
        &self,
        filter: &SearchFilter,
        hits: &[BannerRecord],
    ) -> Result<String, AiError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": prompt::TREND_SYSTEM_PROMPT },
                { "role": "user", "content": prompt::trend_user_prompt(filter, hits) }
            ],
            "max_tokens": 1000
        });
        self.chat(body)
    }

    fn chat(&self, body: serde_json::Value) -> Result<String, AiError> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        log::debug!("POST {url} (model {})", self.config.model);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|b| b.error)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(AiError::Api(format!("{status}: {detail}")));
        }

        let parsed: ChatResponse = response.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AiError::Parse("response contained no message content".to_string()))
    }
}

/// Models often wrap JSON answers in a markdown code fence despite the
/// prompt; peel it off before parsing.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected_at_construction() {
        let err = AiClient::new(AiConfig::new("  ")).unwrap_err();
        assert!(matches!(err, AiError::MissingApiKey));
    }

    #[test]
    fn strips_fenced_json() {
        let raw = "```json\n{\"visual_type\": \"イラスト\"}\n```";
        assert_eq!(strip_code_fence(raw), "{\"visual_type\": \"イラスト\"}");
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn parses_tag_payload() {
        let raw = r#"{"visual_type":"人物写真（単体）","main_color":"青系","atmosphere":"明るい・元気","main_appeal":["未経験歓迎","高収入・高時給"]}"#;
        let tags: BannerTags = serde_json::from_str(raw).unwrap();
        assert_eq!(tags.visual_type.as_deref(), Some("人物写真（単体）"));
        assert_eq!(tags.main_appeal.len(), 2);
    }
}
