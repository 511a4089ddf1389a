use std::sync::{Arc, Mutex};

use ytnotes::translate::Translator;

#[derive(Clone)]
pub struct MockTranslator {
    /// `(text, target_code)` pairs received so far
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
    pub fail_with: Option<String>,
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }
}

impl MockTranslator {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target_code: &str) -> eyre::Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), target_code.to_string()));
        if let Some(ref msg) = self.fail_with {
            return Err(eyre::eyre!("{}", msg));
        }
        Ok(format!("[{target_code}] {text}"))
    }
}
