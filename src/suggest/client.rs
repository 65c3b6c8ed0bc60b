//! Generation service client.
//!
//! T035: Implement the single-call suggestion client
//! T036: Map transport failures onto the suggestion error taxonomy

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::Value;

use crate::storage::config::SuggestionSettings;

use super::parser::parse_suggestions;
use super::types::{SuggestError, SuggestedActivity};

/// Client for the plan generation API.
///
/// One outbound request per invocation. No retries, no caching of prompts or
/// responses.
pub struct SuggestionClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl SuggestionClient {
    /// Build a client from settings.
    ///
    /// Fails with [`SuggestError::MissingApiKey`] when no credential is
    /// available, so a request is never attempted without one.
    pub fn from_settings(settings: &SuggestionSettings) -> Result<Self, SuggestError> {
        let api_key = settings.resolve_api_key().ok_or(SuggestError::MissingApiKey)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| SuggestError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
        })
    }

    /// Request a weekly plan and coerce the response into candidates.
    pub async fn fetch_suggestions(
        &self,
        prompt: &str,
        fallback_date: NaiveDate,
    ) -> Result<Vec<SuggestedActivity>, SuggestError> {
        let text = self.generate(prompt).await?;
        parse_suggestions(&text, fallback_date)
    }

    /// Send the prompt and extract the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, SuggestError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);

        let request = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json"
            }
        });

        tracing::debug!("Suggestion request to {}", url);
        let start = std::time::Instant::now();

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    SuggestError::Network(e.to_string())
                } else {
                    SuggestError::Api(e.to_string())
                }
            })?;

        let status = response.status();
        tracing::info!(
            "Suggestion response: status={}, elapsed={:.2}s",
            status,
            start.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if is_quota_error(status, &body) {
                return Err(SuggestError::RateLimited);
            }
            return Err(SuggestError::Api(format!(
                "service returned status {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SuggestError::Api(e.to_string()))?;

        extract_candidate_text(&body)
            .ok_or_else(|| SuggestError::Api("response contained no candidate text".to_string()))
    }
}

/// Whether a failure indicates quota or rate exhaustion.
fn is_quota_error(status: reqwest::StatusCode, body: &str) -> bool {
    status.as_u16() == 429
        || body.contains("RESOURCE_EXHAUSTED")
        || body.to_ascii_lowercase().contains("quota")
}

/// Pull the first candidate's text out of a generateContent response.
fn extract_candidate_text(body: &Value) -> Option<String> {
    body.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_blocks_client_creation() {
        let settings = SuggestionSettings {
            api_key: None,
            ..Default::default()
        };

        if std::env::var(crate::storage::config::API_KEY_ENV_VAR).is_err() {
            let result = SuggestionClient::from_settings(&settings);
            assert!(matches!(result, Err(SuggestError::MissingApiKey)));
        }
    }

    #[test]
    fn test_client_creation_with_key() {
        let settings = SuggestionSettings {
            api_key: Some("test-api-key".to_string()),
            ..Default::default()
        };

        let client = SuggestionClient::from_settings(&settings).unwrap();
        assert!(client.endpoint.starts_with("https://"));
        assert!(!client.endpoint.ends_with('/'));
    }

    #[test]
    fn test_quota_detection() {
        let too_many = reqwest::StatusCode::TOO_MANY_REQUESTS;
        let bad_request = reqwest::StatusCode::BAD_REQUEST;

        assert!(is_quota_error(too_many, ""));
        assert!(is_quota_error(bad_request, "Quota exceeded for model"));
        assert!(is_quota_error(bad_request, r#"{"status":"RESOURCE_EXHAUSTED"}"#));
        assert!(!is_quota_error(bad_request, "invalid argument"));
    }

    #[test]
    fn test_extract_candidate_text() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "[]" }]
                }
            }]
        });
        assert_eq!(extract_candidate_text(&body).as_deref(), Some("[]"));

        let empty = serde_json::json!({ "candidates": [] });
        assert_eq!(extract_candidate_text(&empty), None);
    }
}
