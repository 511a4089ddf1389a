use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ytnotes::whisper::SpeechRecognizer;

#[derive(Clone)]
pub struct MockRecognizer {
    pub text: String,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
}

impl MockRecognizer {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl SpeechRecognizer for MockRecognizer {
    fn transcribe(&self, audio_path: &Path) -> eyre::Result<String> {
        self.calls.lock().unwrap().push(audio_path.to_path_buf());
        if !audio_path.exists() {
            eyre::bail!("audio file missing: {}", audio_path.display());
        }
        if let Some(ref msg) = self.fail_with {
            return Err(eyre::eyre!("{}", msg));
        }
        Ok(self.text.clone())
    }
}
