use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a request can fail. All variants are terminal for the request.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid YouTube URL format: {0}")]
    InvalidUrlFormat(String),

    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("No transcript available for video {0}")]
    NoTranscriptAvailable(String),

    #[error("No transcript found for language '{language}' (available: {})", .available.join(", "))]
    TranscriptNotFoundForLanguage { language: String, available: Vec<String> },

    #[error("Error fetching transcript: {0}")]
    RetrievalFailed(String),

    #[error("Error downloading audio: {0}")]
    AudioDownloadFailed(String),

    #[error("Error transcribing audio: {0}")]
    TranscriptionFailed(String),

    #[error("Error generating summary: {0}")]
    SummarizationFailed(String),

    #[error("Error translating summary: {0}")]
    TranslationFailed(String),

    #[error("{0} environment variable not set (required for summarization)")]
    MissingApiKey(String),
}

impl Error {
    /// Resolver failures that send the request down the audio path.
    ///
    /// Disabled, absent and unretrievable transcripts are all treated as
    /// "no transcript". A language the user asked for explicitly is not.
    pub fn falls_back_to_audio(&self) -> bool {
        matches!(
            self,
            Error::TranscriptsDisabled(_) | Error::NoTranscriptAvailable(_) | Error::RetrievalFailed(_)
        )
    }
}
