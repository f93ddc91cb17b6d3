//! Gemini generateContent / model-listing client.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::{LlmError, Result};

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    api_key: String,
    client: reqwest::Client,
}

async fn check_response_status(resp: reqwest::Response) -> Result<serde_json::Value> {
    let status = resp.status().as_u16();
    let body: serde_json::Value = resp.json().await?;
    if status >= 400 {
        let msg = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .unwrap_or("unknown API error")
            .to_string();
        return Err(LlmError::Api {
            status,
            message: msg,
        });
    }
    Ok(body)
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Generate text for a single-user-turn prompt.
    ///
    /// Fails if the model's safety filter blocks the prompt
    /// (`promptFeedback.blockReason`) or if no candidate carries text.
    #[instrument(skip(self, prompt))]
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_BASE, model, self.api_key
        );

        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": { "temperature": 0.1 }
        });

        let resp = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(30))
            .json(&body)
            .send()
            .await?;
        let json = check_response_status(resp).await?;

        if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
            return Err(LlmError::Blocked(reason.to_string()));
        }

        let text = extract_candidate_text(&json);
        if text.trim().is_empty() {
            return Err(LlmError::NoContent);
        }
        debug!(chars = text.len(), "gemini returned text");
        Ok(text)
    }

    fn models_request(&self, page_token: Option<&str>) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .get(format!("{}/models", GEMINI_BASE))
            .timeout(Duration::from_secs(30))
            .query(&[("key", self.api_key.as_str()), ("pageSize", "200")]);
        if let Some(token) = page_token {
            req = req.query(&[("pageToken", token)]);
        }
        req
    }

    /// List short model ids supporting generateContent, sorted and unique.
    /// Follows `nextPageToken` so the set is complete.
    #[instrument(skip(self))]
    pub async fn list_generation_models(&self) -> Result<Vec<String>> {
        let mut names = std::collections::BTreeSet::new();
        let mut page_token: Option<String> = None;

        loop {
            let resp = self.models_request(page_token.as_deref()).send().await?;
            let json = check_response_status(resp).await?;

            for model in json["models"].as_array().unwrap_or(&vec![]) {
                let supported = model["supportedGenerationMethods"]
                    .as_array()
                    .map(|m| m.iter().any(|v| v.as_str() == Some("generateContent")))
                    .unwrap_or(false);
                if !supported {
                    continue;
                }
                if let Some(name) = model["name"].as_str() {
                    // API names are qualified like "models/gemini-2.5-flash".
                    let short = name.rsplit('/').next().unwrap_or(name);
                    names.insert(short.to_string());
                }
            }

            page_token = json["nextPageToken"].as_str().map(String::from);
            if page_token.is_none() {
                break;
            }
        }

        Ok(names.into_iter().collect())
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_candidate_text(json: &serde_json::Value) -> String {
    json["candidates"][0]["content"]["parts"]
        .as_array()
        .unwrap_or(&vec![])
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn candidate_text_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{"text": "SELECT "}, {"text": "1"}] }
            }]
        });
        assert_eq!(extract_candidate_text(&body), "SELECT 1");
    }

    #[test]
    fn missing_candidates_yield_empty_text() {
        assert_eq!(extract_candidate_text(&json!({})), "");
    }

    #[test]
    fn page_token_is_percent_encoded() {
        let client = GeminiClient::new("test-key");
        let req = client
            .models_request(Some("a+b/c=="))
            .build()
            .unwrap();

        let query = req.url().query().unwrap();
        assert!(query.contains("pageToken=a%2Bb%2Fc%3D%3D"));
        assert!(query.contains("key=test-key"));
    }
}
