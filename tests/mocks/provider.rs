use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ytnotes::transcript::TranscriptProvider;
use ytnotes::{Error, LanguageTrack, Result, Segment, VideoId};

#[derive(Clone)]
pub struct MockProvider {
    pub tracks: Vec<LanguageTrack>,
    pub segments: HashMap<String, Vec<String>>,
    pub disabled: bool,
    pub fail_with: Option<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            segments: HashMap::new(),
            disabled: false,
            fail_with: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockProvider {
    /// A track named `name` with code `code` whose segments are `texts`
    pub fn with_track(mut self, code: &str, name: &str, texts: &[&str]) -> Self {
        self.tracks.push(LanguageTrack::new(code, name));
        self.segments
            .insert(code.to_string(), texts.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, video_id: &VideoId) -> Result<()> {
        if self.disabled {
            return Err(Error::TranscriptsDisabled(video_id.to_string()));
        }
        if let Some(ref msg) = self.fail_with {
            return Err(Error::RetrievalFailed(msg.clone()));
        }
        Ok(())
    }
}

impl TranscriptProvider for MockProvider {
    async fn list_transcripts(&self, video_id: &VideoId) -> Result<Vec<LanguageTrack>> {
        self.calls.lock().unwrap().push("list".to_string());
        self.check(video_id)?;
        Ok(self.tracks.clone())
    }

    async fn fetch_transcript(&self, video_id: &VideoId, code: &str) -> Result<(LanguageTrack, Vec<Segment>)> {
        self.calls.lock().unwrap().push(format!("fetch:{code}"));
        self.check(video_id)?;

        let track = self
            .tracks
            .iter()
            .find(|t| t.code == code)
            .ok_or_else(|| Error::NoTranscriptAvailable(video_id.to_string()))?;
        let segments = self.segments[code]
            .iter()
            .enumerate()
            .map(|(i, text)| Segment {
                text: text.clone(),
                start: i as f64,
                duration: 1.0,
            })
            .collect();
        Ok((track.clone(), segments))
    }
}
