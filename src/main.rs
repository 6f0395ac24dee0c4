use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use feedreader::app::{App, AppEvent};
use feedreader::config::Config;
use feedreader::feed::FeedClient;
use feedreader::ui;

/// Default config file path (~/.config/feedreader/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("feedreader")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "feedreader", about = "Terminal feed reader")]
struct Args {
    /// Config file (defaults to ~/.config/feedreader/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Index (as printed by --list) of the feed to load at startup
    #[arg(long, value_name = "INDEX")]
    feed: Option<usize>,

    /// Print the feed list and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they stay out of the alternate screen
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let registry = config.registry().context("Invalid feed list")?;

    if args.list {
        for (i, feed) in registry.list().iter().enumerate() {
            println!("{:>2}  {:<24} {}", i, feed.name, feed.url);
        }
        return Ok(());
    }

    let client =
        FeedClient::new(config.request_timeout()).context("Failed to create HTTP client")?;
    let mut app = App::new(registry, client).with_max_entries(config.max_entries);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    let initial = args.feed.unwrap_or(config.initial_feed);
    app.load_feed(initial, &event_tx, None)
        .context("Failed to load initial feed")?;

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
