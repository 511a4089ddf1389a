use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::Command;

use eyre::{Result, bail};
use log::{debug, info};

mod cli;

use cli::{Cli, OutputFormat};
use ytnotes::config::{self, Config};
use ytnotes::fallback::YtDlp;
use ytnotes::pipeline::{Fallback, PipelineBuilder};
use ytnotes::summarize::{self, Gemini};
use ytnotes::transcript::{self, SelectionPolicy};
use ytnotes::translate::GoogleTranslate;
use ytnotes::whisper::{Whisper, WhisperModel};
use ytnotes::youtube::InnerTube;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytnotes.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytnotes")
        .join("logs")
}

fn tool_version(name: &str) -> Option<String> {
    Command::new(name)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| {
            String::from_utf8_lossy(&o.stdout)
                .trim()
                .lines()
                .next()
                .unwrap_or("")
                .to_string()
        })
}

fn tool_line(name: &str, purpose: &str) -> String {
    match tool_version(name) {
        Some(v) => format!("  \x1b[32m✅\x1b[0m {name:<10} {v}"),
        None => format!("  \x1b[31m❌\x1b[0m {name:<10} (not found — needed for {purpose})"),
    }
}

fn build_after_help() -> String {
    let yt_dlp_line = tool_line("yt-dlp", "audio fallback");
    let whisper_line = tool_line("whisper", "audio transcription");
    let log_path = log_dir().join("ytnotes.log");

    format!(
        "\nREQUIRED TOOLS:\n{yt_dlp_line}\n{whisper_line}\n\nSummaries need {} in the environment or a .env file.\nLogs are written to: {}",
        config::API_KEY_VAR,
        log_path.display()
    )
}

fn selection_policy(cli: &Cli, config: &Config) -> SelectionPolicy {
    if let Some(ref lang) = cli.lang {
        SelectionPolicy::Explicit(lang.clone())
    } else if cli.first_available {
        SelectionPolicy::FirstAvailable
    } else {
        SelectionPolicy::Default(config.default_lang.clone().unwrap_or_else(|| "en".to_string()))
    }
}

fn fallback_mode(cli: &Cli) -> Fallback {
    if cli.whisper_only {
        Fallback::Always
    } else if cli.no_fallback {
        Fallback::Never
    } else {
        Fallback::Auto
    }
}

/// Print to stdout, or append to the output file opened once for all URLs
fn emit(out: Option<&mut File>, rendered: &str) -> io::Result<()> {
    match out {
        Some(file) => writeln!(file, "{rendered}"),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the key may come from the real environment
    let _ = dotenvy::dotenv();
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_default();
    if cli.verbose {
        let config_path = config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
    }

    let client = reqwest::Client::new();

    // Collect URLs: from arg or stdin
    let urls = if let Some(ref url) = cli.url {
        vec![url.clone()]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };
    let urls: Vec<String> = urls.into_iter().map(|u| u.trim().to_string()).filter(|u| !u.is_empty()).collect();

    if urls.is_empty() {
        bail!("no URL provided\n\nUsage: ytnotes <URL>\n       echo <URL> | ytnotes");
    }

    if cli.list_languages {
        let provider = InnerTube::new(client.clone());
        for url in &urls {
            let video_id = ytnotes::extract_video_id(url)?;
            let tracks = transcript::list_languages(&provider, &video_id).await?;
            println!("Transcript languages for {video_id}:");
            for track in tracks {
                println!("  {:<8} {}", track.code, track.name);
            }
        }
        return Ok(());
    }

    let api_key = config::api_key_from_env()?;
    let model = cli
        .model
        .clone()
        .or_else(|| config.gemini_model.clone())
        .unwrap_or_else(|| summarize::DEFAULT_MODEL.to_string());
    let whisper_model = cli
        .whisper_model
        .or_else(|| config.whisper_model.as_deref().and_then(WhisperModel::parse))
        .unwrap_or_default();
    let format = cli
        .format
        .or_else(|| {
            config
                .default_format
                .as_deref()
                .and_then(|f| <OutputFormat as clap::ValueEnum>::from_str(f, true).ok())
        })
        .unwrap_or(OutputFormat::Text);
    debug!("Gemini model: {model}, whisper model: {}", whisper_model.name());

    let pipeline = PipelineBuilder::new()
        .provider(InnerTube::new(client.clone()))
        .downloader(YtDlp)
        .recognizer(Whisper::new(whisper_model))
        .generator(Gemini::new(client.clone(), api_key, model))
        .translator(GoogleTranslate::new(client.clone()))
        .policy(selection_policy(&cli, &config))
        .fallback(fallback_mode(&cli))
        .summary_language(cli.summary_lang.clone().or_else(|| config.summary_lang.clone()))
        .translate_to(cli.translate)
        .build();

    let mut out_file = cli.output.as_ref().map(File::create).transpose()?;

    for url in &urls {
        let notes = pipeline.run(url).await?;

        if cli.verbose {
            eprintln!(
                "Video: {}\nThumbnail: {}\nSource: {}\nLanguage: {} ({})",
                notes.video_id,
                ytnotes::thumbnail_url(&notes.video_id),
                notes.transcript.source,
                notes.transcript.language.name,
                notes.transcript.language.code,
            );
        }

        let rendered = match format {
            OutputFormat::Text => ytnotes::output::render_text(&notes),
            OutputFormat::Json => ytnotes::output::render_json(&notes)?,
        };

        emit(out_file.as_mut(), &rendered)?;
    }

    if cli.verbose {
        if let Some(ref path) = cli.output {
            eprintln!("Output written to: {}", path.display());
        }
    }

    Ok(())
}
