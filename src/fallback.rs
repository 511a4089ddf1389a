use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use eyre::bail;
use log::{debug, info};

use crate::whisper::{SpeechRecognizer, last_line};
use crate::{Error, LanguageTrack, Result, Transcript, TranscriptSource, VideoId};

/// Stem of the downloaded audio file inside the scratch directory.
/// Video ids are not validated, so they never become part of a path.
pub const AUDIO_FILE_STEM: &str = "audio";

/// Encoding requested from the downloader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFormat {
    pub codec: &'static str,
    pub bitrate_kbps: u32,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            codec: "mp3",
            bitrate_kbps: 192,
        }
    }
}

/// Fetches the best available audio track of a video
pub trait AudioDownloader {
    /// Download into `dir` and return the path of the produced file
    fn download_best_audio(&self, video_id: &VideoId, dir: &Path, format: &AudioFormat) -> eyre::Result<PathBuf>;
}

/// Audio downloads via the yt-dlp command line tool
#[derive(Debug, Clone, Default)]
pub struct YtDlp;

impl AudioDownloader for YtDlp {
    fn download_best_audio(&self, video_id: &VideoId, dir: &Path, format: &AudioFormat) -> eyre::Result<PathBuf> {
        let url = video_id.watch_url();
        let (output_template, output_path) = audio_output_paths(dir, format);

        debug!("Downloading audio via yt-dlp: {url}");

        let output = Command::new("yt-dlp")
            .args([
                "--format",
                "bestaudio/best",
                "--extract-audio",
                "--audio-format",
                format.codec,
                "--audio-quality",
                &format!("{}K", format.bitrate_kbps),
                "--no-playlist",
                "-o",
            ])
            .arg(&output_template)
            .arg(&url)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output();

        match output {
            Ok(o) if o.status.success() => {}
            Ok(o) => bail!(
                "yt-dlp exited with status {}: {}",
                o.status,
                last_line(&String::from_utf8_lossy(&o.stderr))
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                bail!(
                    "yt-dlp not found. Install it to enable audio fallback:\n  \
                     pip install yt-dlp\n  \
                     or: brew install yt-dlp"
                );
            }
            Err(e) => bail!("failed to run yt-dlp: {e}"),
        }

        if !output_path.exists() {
            bail!("yt-dlp did not produce expected output file: {}", output_path.display());
        }

        Ok(output_path)
    }
}

/// yt-dlp output template and the file it produces for `format`
fn audio_output_paths(dir: &Path, format: &AudioFormat) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{AUDIO_FILE_STEM}.%(ext)s")),
        dir.join(format!("{AUDIO_FILE_STEM}.{}", format.codec)),
    )
}

/// Derive a transcript from the video's audio when no caption track is usable.
///
/// The audio lands in a scratch directory unique to this call. The directory
/// is removed when this function returns, whatever the outcome.
pub fn transcribe_audio<D, R>(downloader: &D, recognizer: &R, video_id: &VideoId) -> Result<Transcript>
where
    D: AudioDownloader,
    R: SpeechRecognizer,
{
    let scratch = tempfile::Builder::new()
        .prefix("ytnotes-")
        .tempdir()
        .map_err(|e| Error::AudioDownloadFailed(format!("could not create scratch directory: {e}")))?;

    let audio_path = downloader
        .download_best_audio(video_id, scratch.path(), &AudioFormat::default())
        .map_err(|e| Error::AudioDownloadFailed(format!("{e:#}")))?;
    info!("Downloaded audio to {}", audio_path.display());

    let text = recognizer
        .transcribe(&audio_path)
        .map_err(|e| Error::TranscriptionFailed(format!("{e:#}")))?;
    debug!("Whisper produced {} characters", text.len());

    Ok(Transcript {
        video_id: video_id.clone(),
        language: LanguageTrack::auto_detected(),
        source: TranscriptSource::Whisper,
        text,
    })
}
