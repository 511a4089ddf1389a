use crate::pipeline::Notes;

/// Render notes as markdown: summary under a heading naming its language,
/// then the translation if one was requested
pub fn render_text(notes: &Notes) -> String {
    let mut out = format!(
        "## Detailed Notes ({}):\n\n{}\n",
        notes.summary.language,
        notes.summary.text.trim()
    );

    if let Some(ref translation) = notes.translation {
        out.push_str(&format!(
            "\n## Translated Notes ({}):\n\n{}\n",
            translation.language,
            translation.text.trim()
        ));
    }

    out
}

pub fn render_json(notes: &Notes) -> serde_json::Result<String> {
    serde_json::to_string_pretty(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LanguageTrack, Summary, TargetLanguage, Transcript, TranscriptSource, TranslatedSummary};

    fn sample_notes() -> Notes {
        let video_id = crate::extract_video_id("https://www.youtube.com/watch?v=abc123").unwrap();
        Notes {
            video_id: video_id.clone(),
            transcript: Transcript {
                video_id,
                language: LanguageTrack::new("en", "English"),
                source: TranscriptSource::Caption,
                text: "Hello world".to_string(),
            },
            summary: Summary {
                language: "English".to_string(),
                text: "Summary text\n".to_string(),
            },
            translation: None,
        }
    }

    #[test]
    fn test_render_text() {
        let output = render_text(&sample_notes());
        assert_eq!(output, "## Detailed Notes (English):\n\nSummary text\n");
    }

    #[test]
    fn test_render_text_with_translation() {
        let mut notes = sample_notes();
        notes.translation = Some(TranslatedSummary {
            language: TargetLanguage::French,
            text: "Texte du résumé".to_string(),
        });
        let output = render_text(&notes);
        assert!(output.ends_with("## Translated Notes (French):\n\nTexte du résumé\n"));
    }

    #[test]
    fn test_render_json() {
        let mut notes = sample_notes();
        notes.translation = Some(TranslatedSummary {
            language: TargetLanguage::Chinese,
            text: "摘要".to_string(),
        });
        let json: serde_json::Value = serde_json::from_str(&render_json(&notes).unwrap()).unwrap();
        assert_eq!(json["video_id"], "abc123");
        assert_eq!(json["transcript"]["source"], "Caption");
        assert_eq!(json["transcript"]["language"]["name"], "English");
        assert_eq!(json["summary"]["text"], "Summary text\n");
        assert_eq!(json["translation"]["language"], "zh-cn");
    }
}
