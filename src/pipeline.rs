use log::{info, warn};
use serde::Serialize;

use crate::fallback::{self, AudioDownloader};
use crate::summarize::{self, Generator};
use crate::transcript::{self, SelectionPolicy, TranscriptProvider};
use crate::translate::{self, Translator};
use crate::whisper::SpeechRecognizer;
use crate::{LanguageTrack, Result, Summary, TargetLanguage, Transcript, TranscriptSource, TranslatedSummary, VideoId};

/// Summary language used when the transcript language is unknown
pub const FALLBACK_SUMMARY_LANGUAGE: &str = "English";

/// When to derive the transcript from audio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fallback {
    /// Only when the video has no usable transcript track
    #[default]
    Auto,
    /// Never; a missing transcript fails the request
    Never,
    /// Always; caption tracks are not consulted
    Always,
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub policy: SelectionPolicy,
    pub fallback: Fallback,
    /// Language the summary is written in; defaults to the transcript's language
    pub summary_language: Option<String>,
    pub translate_to: Option<TargetLanguage>,
}

/// Everything produced for one video
#[derive(Debug, Clone, Serialize)]
pub struct Notes {
    pub video_id: VideoId,
    pub transcript: Transcript,
    pub summary: Summary,
    pub translation: Option<TranslatedSummary>,
}

/// URL to notes, one stage after another
pub struct Pipeline<P, D, R, G, T> {
    provider: P,
    downloader: D,
    recognizer: R,
    generator: G,
    translator: T,
    options: Options,
}

impl<P, D, R, G, T> Pipeline<P, D, R, G, T>
where
    P: TranscriptProvider,
    D: AudioDownloader,
    R: SpeechRecognizer,
    G: Generator,
    T: Translator,
{
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run every stage for `url`. The first failing stage decides the outcome.
    pub async fn run(&self, url: &str) -> Result<Notes> {
        let video_id = crate::extract_video_id(url)?;
        info!("Processing video {video_id}");

        let transcript = self.transcript(&video_id).await?;
        info!(
            "Transcript for {video_id}: source={}, language={}, {} characters",
            transcript.source,
            transcript.language.code,
            transcript.text.len()
        );

        let language = self.summary_language(&transcript);
        let summary = summarize::summarize(&self.generator, &transcript, &language).await?;

        let translation = match self.options.translate_to {
            Some(target) => Some(translate::translate(&self.translator, &summary, target).await?),
            None => None,
        };

        Ok(Notes {
            video_id,
            transcript,
            summary,
            translation,
        })
    }

    /// Transcript tracks available for the video at `url`
    pub async fn languages(&self, url: &str) -> Result<Vec<LanguageTrack>> {
        let video_id = crate::extract_video_id(url)?;
        transcript::list_languages(&self.provider, &video_id).await
    }

    /// Caption track per the selection policy, or audio transcription as the fallback allows
    pub async fn transcript(&self, video_id: &VideoId) -> Result<Transcript> {
        if self.options.fallback == Fallback::Always {
            return fallback::transcribe_audio(&self.downloader, &self.recognizer, video_id);
        }

        match transcript::resolve(&self.provider, video_id, &self.options.policy).await {
            Ok(transcript) => Ok(transcript),
            Err(e) if e.falls_back_to_audio() && self.options.fallback == Fallback::Auto => {
                warn!("{e}; falling back to audio transcription");
                fallback::transcribe_audio(&self.downloader, &self.recognizer, video_id)
            }
            Err(e) => Err(e),
        }
    }

    fn summary_language(&self, transcript: &Transcript) -> String {
        if let Some(language) = &self.options.summary_language {
            return language.clone();
        }
        match transcript.source {
            TranscriptSource::Caption => transcript.language.language_name().to_string(),
            TranscriptSource::Whisper => FALLBACK_SUMMARY_LANGUAGE.to_string(),
        }
    }
}

/// Assembles a [`Pipeline`] one collaborator at a time
pub struct PipelineBuilder<P = (), D = (), R = (), G = (), T = ()> {
    provider: P,
    downloader: D,
    recognizer: R,
    generator: G,
    translator: T,
    options: Options,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            provider: (),
            downloader: (),
            recognizer: (),
            generator: (),
            translator: (),
            options: Options::default(),
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, D, R, G, T> PipelineBuilder<P, D, R, G, T> {
    pub fn provider<P2: TranscriptProvider>(self, provider: P2) -> PipelineBuilder<P2, D, R, G, T> {
        PipelineBuilder {
            provider,
            downloader: self.downloader,
            recognizer: self.recognizer,
            generator: self.generator,
            translator: self.translator,
            options: self.options,
        }
    }

    pub fn downloader<D2: AudioDownloader>(self, downloader: D2) -> PipelineBuilder<P, D2, R, G, T> {
        PipelineBuilder {
            provider: self.provider,
            downloader,
            recognizer: self.recognizer,
            generator: self.generator,
            translator: self.translator,
            options: self.options,
        }
    }

    pub fn recognizer<R2: SpeechRecognizer>(self, recognizer: R2) -> PipelineBuilder<P, D, R2, G, T> {
        PipelineBuilder {
            provider: self.provider,
            downloader: self.downloader,
            recognizer,
            generator: self.generator,
            translator: self.translator,
            options: self.options,
        }
    }

    pub fn generator<G2: Generator>(self, generator: G2) -> PipelineBuilder<P, D, R, G2, T> {
        PipelineBuilder {
            provider: self.provider,
            downloader: self.downloader,
            recognizer: self.recognizer,
            generator,
            translator: self.translator,
            options: self.options,
        }
    }

    pub fn translator<T2: Translator>(self, translator: T2) -> PipelineBuilder<P, D, R, G, T2> {
        PipelineBuilder {
            provider: self.provider,
            downloader: self.downloader,
            recognizer: self.recognizer,
            generator: self.generator,
            translator,
            options: self.options,
        }
    }

    pub fn policy(mut self, policy: SelectionPolicy) -> Self {
        self.options.policy = policy;
        self
    }

    pub fn fallback(mut self, fallback: Fallback) -> Self {
        self.options.fallback = fallback;
        self
    }

    pub fn summary_language(mut self, language: Option<String>) -> Self {
        self.options.summary_language = language;
        self
    }

    pub fn translate_to(mut self, target: Option<TargetLanguage>) -> Self {
        self.options.translate_to = target;
        self
    }
}

impl<P, D, R, G, T> PipelineBuilder<P, D, R, G, T>
where
    P: TranscriptProvider,
    D: AudioDownloader,
    R: SpeechRecognizer,
    G: Generator,
    T: Translator,
{
    pub fn build(self) -> Pipeline<P, D, R, G, T> {
        Pipeline {
            provider: self.provider,
            downloader: self.downloader,
            recognizer: self.recognizer,
            generator: self.generator,
            translator: self.translator,
            options: self.options,
        }
    }
}
