use std::future::Future;

use log::debug;

use crate::{Error, LanguageTrack, Result, Segment, Transcript, TranscriptSource, VideoId};

/// Source of authored transcript tracks
pub trait TranscriptProvider {
    /// Available tracks, in the order the provider returns them
    fn list_transcripts(&self, video_id: &VideoId) -> impl Future<Output = Result<Vec<LanguageTrack>>>;

    /// Segments of a single track
    fn fetch_transcript(
        &self,
        video_id: &VideoId,
        code: &str,
    ) -> impl Future<Output = Result<(LanguageTrack, Vec<Segment>)>>;
}

/// How a transcript language is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Exactly this language code, or fail
    Explicit(String),
    /// Whichever track the provider lists first
    FirstAvailable,
    /// Fetch this code directly, without listing tracks
    Default(String),
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::Default("en".to_string())
    }
}

/// Pick a transcript track according to `policy` and flatten it to text
pub async fn resolve<P: TranscriptProvider>(
    provider: &P,
    video_id: &VideoId,
    policy: &SelectionPolicy,
) -> Result<Transcript> {
    let code = match policy {
        SelectionPolicy::Explicit(code) => {
            let tracks = provider.list_transcripts(video_id).await?;
            if !tracks.iter().any(|t| &t.code == code) {
                return Err(Error::TranscriptNotFoundForLanguage {
                    language: code.clone(),
                    available: tracks.into_iter().map(|t| t.code).collect(),
                });
            }
            code.clone()
        }
        SelectionPolicy::FirstAvailable => {
            let tracks = provider.list_transcripts(video_id).await?;
            match tracks.into_iter().next() {
                Some(track) => track.code,
                None => return Err(Error::NoTranscriptAvailable(video_id.to_string())),
            }
        }
        SelectionPolicy::Default(code) => code.clone(),
    };

    debug!("Fetching transcript track {code} for {video_id}");
    let (language, segments) = provider.fetch_transcript(video_id, &code).await?;

    Ok(Transcript {
        video_id: video_id.clone(),
        language,
        source: TranscriptSource::Caption,
        text: join_segments(&segments),
    })
}

/// Tracks offered to the user when choosing a transcript language
pub async fn list_languages<P: TranscriptProvider>(provider: &P, video_id: &VideoId) -> Result<Vec<LanguageTrack>> {
    provider.list_transcripts(video_id).await
}

/// Single-space join of segment texts, provider order preserved
pub fn join_segments(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect::<Vec<_>>().join(" ")
}
