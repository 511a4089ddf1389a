use clap::Parser;
use std::path::PathBuf;

use ytnotes::TargetLanguage;
use ytnotes::whisper::WhisperModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "ytnotes",
    about = "Summarize a YouTube video into notes",
    version
)]
pub struct Cli {
    /// YouTube video URL (reads URLs from stdin if omitted)
    pub url: Option<String>,

    /// Transcript language code; fails if the video has no such track
    #[arg(short, long, conflicts_with = "first_available")]
    pub lang: Option<String>,

    /// Use the first transcript track the video lists
    #[arg(long)]
    pub first_available: bool,

    /// List the video's transcript languages and exit
    #[arg(long)]
    pub list_languages: bool,

    /// Language to write the summary in (defaults to the transcript's language)
    #[arg(short, long)]
    pub summary_lang: Option<String>,

    /// Translate the summary into this language
    #[arg(short, long, value_enum)]
    pub translate: Option<TargetLanguage>,

    /// Output format: text (default), json
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip caption tracks, always transcribe the audio
    #[arg(long, conflicts_with = "no_fallback")]
    pub whisper_only: bool,

    /// Don't fall back to audio transcription if no transcript is available
    #[arg(long)]
    pub no_fallback: bool,

    /// Gemini model for summarization
    #[arg(long)]
    pub model: Option<String>,

    /// Whisper model size for audio transcription
    #[arg(long, value_enum)]
    pub whisper_model: Option<WhisperModel>,

    /// Show transcript source, language and thumbnail
    #[arg(short, long)]
    pub verbose: bool,
}
