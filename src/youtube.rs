use eyre::bail;
use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::transcript::TranscriptProvider;
use crate::{Error, LanguageTrack, Result, Segment, VideoId};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct InnerTubePlayerResponse {
    captions: Option<CaptionsData>,
}

#[derive(Debug, Deserialize)]
struct CaptionsData {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    player_captions_tracklist_renderer: Option<CaptionTracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct CaptionTracklistRenderer {
    #[serde(rename = "captionTracks")]
    caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
    name: Option<TrackName>,
}

#[derive(Debug, Deserialize)]
struct TrackName {
    #[serde(rename = "simpleText")]
    simple_text: Option<String>,
    runs: Option<Vec<TextRun>>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

impl CaptionTrack {
    fn display_name(&self) -> String {
        self.name
            .as_ref()
            .and_then(|n| {
                n.simple_text
                    .clone()
                    .or_else(|| n.runs.as_ref()?.first().map(|r| r.text.clone()))
            })
            .unwrap_or_else(|| self.language_code.clone())
    }

    fn language(&self) -> LanguageTrack {
        LanguageTrack::new(&self.language_code, self.display_name())
    }
}

/// Caption tracks from YouTube's InnerTube player API
pub struct InnerTube {
    client: reqwest::Client,
}

impl InnerTube {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn caption_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
        let resp = fetch_player(&self.client, video_id)
            .await
            .map_err(|e| Error::RetrievalFailed(format!("{e:#}")))?;
        tracks_from_player(video_id, resp)
    }
}

impl TranscriptProvider for InnerTube {
    async fn list_transcripts(&self, video_id: &VideoId) -> Result<Vec<LanguageTrack>> {
        let tracks = self.caption_tracks(video_id).await?;
        Ok(tracks.iter().map(CaptionTrack::language).collect())
    }

    async fn fetch_transcript(&self, video_id: &VideoId, code: &str) -> Result<(LanguageTrack, Vec<Segment>)> {
        let tracks = self.caption_tracks(video_id).await?;
        let Some(track) = tracks.iter().find(|t| t.language_code == code) else {
            return Err(Error::NoTranscriptAvailable(video_id.to_string()));
        };
        debug!("Using caption track: lang={}", track.language_code);

        let segments = fetch_caption_xml(&self.client, &track.base_url)
            .await
            .and_then(|xml| parse_caption_xml(&xml))
            .map_err(|e| Error::RetrievalFailed(format!("{e:#}")))?;

        Ok((track.language(), segments))
    }
}

async fn fetch_player(client: &reqwest::Client, video_id: &VideoId) -> eyre::Result<InnerTubePlayerResponse> {
    // Step 1: Fetch the watch page to get the InnerTube API key
    let watch_url = video_id.watch_url();
    debug!("Fetching watch page: {watch_url}");

    let page_html = client
        .get(&watch_url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let api_key = extract_api_key(&page_html)?;
    debug!("Extracted InnerTube API key: {api_key}");

    // Step 2: Call InnerTube player endpoint
    let player_url = format!("https://www.youtube.com/youtubei/v1/player?key={api_key}&prettyPrint=false");

    let body = serde_json::json!({
        "context": {
            "client": {
                "hl": "en",
                "gl": "US",
                "clientName": "WEB",
                "clientVersion": "2.20241126.01.00"
            }
        },
        "videoId": video_id.as_str()
    });

    let resp = client
        .post(&player_url)
        .header("User-Agent", USER_AGENT)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(resp)
}

/// A player response without a caption renderer means captions are turned off
fn tracks_from_player(video_id: &VideoId, resp: InnerTubePlayerResponse) -> Result<Vec<CaptionTrack>> {
    let renderer = resp
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .ok_or_else(|| Error::TranscriptsDisabled(video_id.to_string()))?;
    Ok(renderer.caption_tracks.unwrap_or_default())
}

async fn fetch_caption_xml(client: &reqwest::Client, base_url: &str) -> eyre::Result<String> {
    let url = base_url.replace("&fmt=srv3", "");
    let xml = client
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(xml)
}

fn extract_api_key(html: &str) -> eyre::Result<String> {
    let re = Regex::new(r#""INNERTUBE_API_KEY"\s*:\s*"([^"]+)""#)?;
    if let Some(caps) = re.captures(html) {
        return Ok(caps[1].to_string());
    }

    let re2 = Regex::new(r#"innertubeApiKey\s*[=:]\s*"([^"]+)""#)?;
    if let Some(caps) = re2.captures(html) {
        return Ok(caps[1].to_string());
    }

    bail!("could not extract InnerTube API key from watch page");
}

/// Timed-text cues in document order. Cues that are blank after entity
/// decoding and trimming are skipped, as are self-closing `<text/>` cues.
fn parse_caption_xml(xml: &str) -> eyre::Result<Vec<Segment>> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    let mut segments = Vec::new();
    let mut current: Option<(f64, f64)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"text" => {
                let mut start = None;
                let mut dur = None;
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).parse::<f64>().ok();
                    match attr.key.as_ref() {
                        b"start" => start = value,
                        b"dur" => dur = value,
                        _ => {}
                    }
                }
                current = start.map(|s| (s, dur.unwrap_or(0.0)));
            }
            Ok(Event::Text(ref e)) => {
                if let Some((start, duration)) = current.take() {
                    let raw_text = e.unescape().unwrap_or_default().to_string();
                    let text = html_escape::decode_html_entities(&raw_text).trim().to_string();
                    // Blank cues carry no words; keeping them would put runs of
                    // spaces into the joined transcript.
                    if !text.is_empty() {
                        segments.push(Segment { text, start, duration });
                    }
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(e) => bail!("error parsing caption XML: {e}"),
            _ => {}
        }
    }

    Ok(segments)
}
