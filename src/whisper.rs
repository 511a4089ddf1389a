use std::path::Path;
use std::process::{Command, Stdio};

use eyre::{Result, bail};
use log::debug;

/// Turns an audio file into plain text
pub trait SpeechRecognizer {
    fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

/// Whisper model size passed to the `whisper` CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum WhisperModel {
    Tiny,
    #[default]
    Base,
    Small,
    Medium,
    Large,
    Turbo,
}

impl WhisperModel {
    pub fn name(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::Base => "base",
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
            WhisperModel::Turbo => "turbo",
        }
    }

    /// Parse a model name from the config file, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(name, true).ok()
    }
}

/// Local speech recognition through the openai-whisper command line tool
#[derive(Debug, Clone, Default)]
pub struct Whisper {
    model: WhisperModel,
}

impl Whisper {
    pub fn new(model: WhisperModel) -> Self {
        Self { model }
    }
}

impl SpeechRecognizer for Whisper {
    fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let output_dir = audio_path.parent().unwrap_or_else(|| Path::new("."));
        debug!(
            "Running whisper (model {}) on {}",
            self.model.name(),
            audio_path.display()
        );

        let output = Command::new("whisper")
            .arg(audio_path)
            .args(["--model", self.model.name(), "--output_format", "txt", "--output_dir"])
            .arg(output_dir)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output();

        match output {
            Ok(o) if o.status.success() => {}
            Ok(o) => bail!(
                "whisper exited with status {}: {}",
                o.status,
                last_line(&String::from_utf8_lossy(&o.stderr))
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                bail!(
                    "whisper not found. Install it to enable audio transcription:\n  \
                     pip install openai-whisper"
                );
            }
            Err(e) => bail!("failed to run whisper: {e}"),
        }

        let text_path = output_dir.join(text_file_name(audio_path));
        let text = std::fs::read_to_string(&text_path)
            .map_err(|e| eyre::eyre!("whisper did not produce {}: {e}", text_path.display()))?;

        let text = normalize_whisper_text(&text);
        if text.is_empty() {
            bail!("whisper produced an empty transcript");
        }
        Ok(text)
    }
}

/// whisper writes `<stem>.txt` next to the requested output dir
fn text_file_name(audio_path: &Path) -> String {
    let stem = audio_path.file_stem().unwrap_or_default().to_string_lossy();
    format!("{stem}.txt")
}

/// The txt writer emits one line per segment; collapse them into one paragraph
fn normalize_whisper_text(text: &str) -> String {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect::<Vec<_>>().join(" ")
}

pub(crate) fn last_line(stderr: &str) -> &str {
    stderr.trim().lines().last().unwrap_or("no output")
}
