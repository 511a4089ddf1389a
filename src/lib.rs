pub mod config;
pub mod error;
pub mod fallback;
pub mod output;
pub mod pipeline;
pub mod summarize;
pub mod transcript;
pub mod translate;
pub mod whisper;
pub mod youtube;

use serde::Serialize;

pub use error::{Error, Result};

/// Platform identifier of a video, only obtainable through [`extract_video_id`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One available transcript language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageTrack {
    pub code: String,
    pub name: String,
}

impl LanguageTrack {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Language name without YouTube's "(auto-generated)" track marker
    pub fn language_name(&self) -> &str {
        let name = self.name.trim();
        let name = name.strip_suffix("(auto-generated)").map(str::trim_end).unwrap_or(name);
        if name.is_empty() { &self.code } else { name }
    }

    /// Tag for transcripts produced by speech recognition, which reports no language
    pub fn auto_detected() -> Self {
        Self::new("auto", "auto-detected")
    }
}

/// A single captioned segment
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Source of the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TranscriptSource {
    Caption,
    Whisper,
}

impl std::fmt::Display for TranscriptSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptSource::Caption => write!(f, "caption"),
            TranscriptSource::Whisper => write!(f, "whisper"),
        }
    }
}

/// Complete transcript for a video, flattened to one string
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub video_id: VideoId,
    pub language: LanguageTrack,
    pub source: TranscriptSource,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedSummary {
    pub language: TargetLanguage,
    pub text: String,
}

/// Languages a summary can be translated into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum TargetLanguage {
    #[serde(rename = "en")]
    #[value(name = "en")]
    English,
    #[serde(rename = "hi")]
    #[value(name = "hi")]
    Hindi,
    #[serde(rename = "fr")]
    #[value(name = "fr")]
    French,
    #[serde(rename = "es")]
    #[value(name = "es")]
    Spanish,
    #[serde(rename = "de")]
    #[value(name = "de")]
    German,
    #[serde(rename = "zh-cn")]
    #[value(name = "zh-cn")]
    Chinese,
    #[serde(rename = "ar")]
    #[value(name = "ar")]
    Arabic,
    #[serde(rename = "ru")]
    #[value(name = "ru")]
    Russian,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 8] = [
        TargetLanguage::English,
        TargetLanguage::Hindi,
        TargetLanguage::French,
        TargetLanguage::Spanish,
        TargetLanguage::German,
        TargetLanguage::Chinese,
        TargetLanguage::Arabic,
        TargetLanguage::Russian,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::English => "en",
            TargetLanguage::Hindi => "hi",
            TargetLanguage::French => "fr",
            TargetLanguage::Spanish => "es",
            TargetLanguage::German => "de",
            TargetLanguage::Chinese => "zh-cn",
            TargetLanguage::Arabic => "ar",
            TargetLanguage::Russian => "ru",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Hindi => "Hindi",
            TargetLanguage::French => "French",
            TargetLanguage::Spanish => "Spanish",
            TargetLanguage::German => "German",
            TargetLanguage::Chinese => "Chinese (Simplified)",
            TargetLanguage::Arabic => "Arabic",
            TargetLanguage::Russian => "Russian",
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Extract the video ID from a `watch?v=ID` or `youtu.be/ID` URL
pub fn extract_video_id(input: &str) -> Result<VideoId> {
    let input = input.trim();

    let rest = if let Some((_, rest)) = input.split_once("v=") {
        rest
    } else if let Some((_, rest)) = input.split_once("youtu.be/") {
        rest
    } else {
        return Err(Error::InvalidUrlFormat(input.to_string()));
    };

    let id = rest.split(['&', '?']).next().unwrap_or_default();
    if id.is_empty() {
        return Err(Error::InvalidUrlFormat(input.to_string()));
    }

    Ok(VideoId(id.to_string()))
}

/// Thumbnail image shown next to the notes
pub fn thumbnail_url(video_id: &VideoId) -> String {
    format!("http://img.youtube.com/vi/{video_id}/0.jpg")
}
