//! SpokenPost: article extraction for audio narration
//!
//! Development driver standing in for the browser extension: reads a saved
//! page, runs the pipeline, and prints what would be sent for conversion.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spokenpost::{
    config::{Config, LogFormat},
    ArticlePipeline,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use url::Url;

#[derive(Parser)]
#[command(name = "spokenpost")]
#[command(about = "Extract and normalize article text for audio narration")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "spokenpost.toml")]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate the article in a page and print normalized text
    Extract {
        /// HTML file, or `-` for stdin
        input: String,

        /// Page URL (used by readability to resolve links)
        #[arg(short, long, default_value = "http://localhost/")]
        url: String,

        /// Print the conversion request payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize an HTML fragment without locating an article first
    Normalize {
        /// HTML file, or `-` for stdin
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    init_logging(&config, cli.verbose)?;

    match cli.command {
        Commands::Extract { input, url, json } => extract(config, &input, &url, json),
        Commands::Normalize { input } => normalize(config, &input),
    }
}

fn init_logging(config: &Config, verbose: u8) -> Result<()> {
    let level: Level = config.logging.level.with_verbosity(verbose).into();

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }
    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read HTML from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(Path::new(input))
        .with_context(|| format!("Failed to read HTML from '{}'", input))
}

fn extract(config: Config, input: &str, url: &str, json: bool) -> Result<()> {
    let url = Url::parse(url).with_context(|| format!("Invalid page URL '{}'", url))?;
    let html = read_input(input)?;

    let pipeline = ArticlePipeline::new(config.extraction);
    let article = pipeline
        .run_html(&html, &url)
        .with_context(|| format!("Extraction failed for {}", url))?;

    info!(
        "Extracted '{}' via {} ({} chars)",
        article.title,
        article.strategy.as_str(),
        article.text.len()
    );

    if json {
        let request = article.into_request(&url);
        println!("{}", serde_json::to_string_pretty(&request)?);
    } else {
        if !article.title.is_empty() {
            println!("# {}", article.title);
        }
        if let Some(author) = &article.author {
            println!("by {}", author);
        }
        println!();
        println!("{}", article.text);
    }
    Ok(())
}

fn normalize(config: Config, input: &str) -> Result<()> {
    let html = read_input(input)?;
    let pipeline = ArticlePipeline::new(config.extraction);
    println!("{}", pipeline.normalizer().normalize(&html));
    Ok(())
}
