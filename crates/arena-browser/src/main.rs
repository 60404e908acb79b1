//! Arena - Main Entry Point
//!
//! Loads a page, installs the arena reactions, fires `DOMContentLoaded` and
//! replays an optional event script, then prints what the page did.

mod script;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use arena_engine::{
    reactions, ArenaConfig, Host, Page, RecordingNavigator, RecordingPlayer,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "arena", version, about = "Load the Doggo Arena page and replay input events")]
struct Args {
    /// HTML page to load
    page: PathBuf,

    /// Event script, one input event per line
    #[arg(long)]
    script: Option<PathBuf>,

    /// TOML configuration (selectors, sounds, shortcut target)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for keystroke cue selection
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ArenaConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ArenaConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let html = fs::read_to_string(&args.page)
        .with_context(|| format!("reading {}", args.page.display()))?;
    let url = page_url(&args.page);
    tracing::info!(%url, "loading page");

    let audio = RecordingPlayer::new();
    let nav = RecordingNavigator::new();
    let mut page = Page::from_html(&html, &url, &config, Host::new(audio.clone(), nav.clone()));

    let report = reactions::install(&mut page, &config).context("installing reactions")?;
    page.load();

    if let Some(path) = &args.script {
        let source = fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        let steps = script::parse_script(&source)?;
        let replayed = script::run_script(&mut page, &steps)?;
        tracing::info!(replayed, "script finished");
    }

    println!("installed: {report}");
    println!("readout: {:?}", page.document().text_content(report.readout));
    for src in audio.played() {
        println!("audio: {src}");
    }
    for url in nav.requests() {
        println!("navigate: {url}");
    }
    let document = page.document();
    for fighter in document.query_selector_all(&config.selectors.fighter)? {
        let name = document
            .element(fighter)
            .and_then(|e| e.id())
            .unwrap_or("<anonymous>");
        let classes = document
            .class_list(fighter)
            .map(|c| c.value())
            .unwrap_or_default();
        println!("fighter {name}: {classes}");
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `file://` URL of the page, so relative form actions resolve next to it
fn page_url(path: &Path) -> String {
    fs::canonicalize(path)
        .ok()
        .and_then(|abs| Url::from_file_path(abs).ok())
        .map(String::from)
        .unwrap_or_else(|| "about:blank".to_string())
}
