use std::future::Future;

use eyre::bail;
use log::debug;

use crate::{Error, Result, Summary, TargetLanguage, TranslatedSummary};

const GTX_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// A translation service. Accepts any language code string.
pub trait Translator {
    fn translate(&self, text: &str, target_code: &str) -> impl Future<Output = eyre::Result<String>>;
}

/// Re-render a summary in one of the supported target languages
pub async fn translate<T: Translator>(
    translator: &T,
    summary: &Summary,
    target: TargetLanguage,
) -> Result<TranslatedSummary> {
    debug!("Translating summary from {} to {}", summary.language, target.code());

    let text = translator
        .translate(&summary.text, target.code())
        .await
        .map_err(|e| Error::TranslationFailed(format!("{e:#}")))?;

    Ok(TranslatedSummary { language: target, text })
}

/// Keyless Google Translate web endpoint
pub struct GoogleTranslate {
    client: reqwest::Client,
}

impl GoogleTranslate {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Translator for GoogleTranslate {
    async fn translate(&self, text: &str, target_code: &str) -> eyre::Result<String> {
        let resp = self
            .client
            .get(GTX_URL)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_code),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("Google Translate returned {status}: {body}");
        }

        let json: serde_json::Value = resp.json().await?;
        extract_gtx_text(&json)
    }
}

/// The response is `[[["translated", "original", ...], ...], ...]`
fn extract_gtx_text(json: &serde_json::Value) -> eyre::Result<String> {
    let Some(sentences) = json.get(0).and_then(|s| s.as_array()) else {
        bail!("unexpected Google Translate response format");
    };

    let text: String = sentences
        .iter()
        .filter_map(|s| s.get(0)?.as_str())
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        bail!("Google Translate returned an empty translation");
    }
    Ok(text)
}
