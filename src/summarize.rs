use std::future::Future;

use eyre::bail;
use log::debug;

use crate::{Error, Result, Summary, Transcript};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const PROMPT_TEMPLATE: &str = "You are a YouTube video summarizer. You will be taking the transcript text \
and summarizing the entire video, providing key points within 250 words. \
Write the summary in {language}. \
Please provide the summary of the text given here: ";

/// A text generation service
pub trait Generator {
    fn generate(&self, prompt: &str) -> impl Future<Output = eyre::Result<String>>;
}

/// Instruction template for `language`, followed by the transcript verbatim
pub fn build_prompt(language: &str, transcript_text: &str) -> String {
    let mut prompt = PROMPT_TEMPLATE.replace("{language}", language);
    prompt.push_str(transcript_text);
    prompt
}

/// Summarize a transcript in `language`.
///
/// The full transcript is sent as-is; a transcript over the model's context
/// limit surfaces as the provider's error.
pub async fn summarize<G: Generator>(generator: &G, transcript: &Transcript, language: &str) -> Result<Summary> {
    let prompt = build_prompt(language, &transcript.text);
    debug!("Summarizing {} characters in {language}", transcript.text.len());

    let text = generator
        .generate(&prompt)
        .await
        .map_err(|e| Error::SummarizationFailed(format!("{e:#}")))?;

    Ok(Summary {
        language: language.to_string(),
        text,
    })
}

/// Google Gemini `generateContent`
pub struct Gemini {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl Gemini {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

impl Generator for Gemini {
    async fn generate(&self, prompt: &str) -> eyre::Result<String> {
        debug!("Generating via Gemini API with model {}", self.model);

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );

        let body = serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ]
        });

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("Gemini API returned {status}: {}", extract_gemini_error(&body));
        }

        let json: serde_json::Value = resp.json().await?;
        extract_gemini_text(&json)
    }
}

fn extract_gemini_text(json: &serde_json::Value) -> eyre::Result<String> {
    let candidate = json.get("candidates").and_then(|c| c.get(0));

    if let Some(parts) = candidate
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
    {
        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text")?.as_str())
            .collect::<Vec<_>>()
            .join("");
        if !text.is_empty() {
            return Ok(text);
        }
    }

    if let Some(reason) = candidate
        .and_then(|c| c.get("finishReason"))
        .and_then(|r| r.as_str())
    {
        bail!("Gemini returned no text (finish reason: {reason})");
    }
    if let Some(reason) = json
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(|r| r.as_str())
    {
        bail!("Gemini blocked the prompt ({reason})");
    }
    bail!("unexpected Gemini API response format");
}

/// Prefer the `error.message` field of an error body, else the raw body
fn extract_gemini_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("error")?.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
