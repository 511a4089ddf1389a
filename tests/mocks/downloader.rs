use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ytnotes::VideoId;
use ytnotes::fallback::{AUDIO_FILE_STEM, AudioDownloader, AudioFormat};

/// Writes a placeholder file into the scratch directory it is handed
#[derive(Clone)]
pub struct MockDownloader {
    /// Scratch directories handed to the downloader, one per call
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub formats: Arc<Mutex<Vec<AudioFormat>>>,
    pub fail_with: Option<String>,
}

impl Default for MockDownloader {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            formats: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }
}

impl MockDownloader {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl AudioDownloader for MockDownloader {
    fn download_best_audio(&self, _video_id: &VideoId, dir: &Path, format: &AudioFormat) -> eyre::Result<PathBuf> {
        self.calls.lock().unwrap().push(dir.to_path_buf());
        self.formats.lock().unwrap().push(format.clone());
        if let Some(ref msg) = self.fail_with {
            return Err(eyre::eyre!("{}", msg));
        }
        let path = dir.join(format!("{AUDIO_FILE_STEM}.{}", format.codec));
        std::fs::write(&path, b"ID3")?;
        Ok(path)
    }
}
