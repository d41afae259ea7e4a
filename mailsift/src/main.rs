use anyhow::{bail, Context, Result};
use clap::Parser;
use extractors::{EmailExtractor, ExtractionReport};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

mod config;
mod output;

use config::{LoggingConfig, MailsiftConfig, OutputFormat};

/// Pull every email address out of files, archives and documents.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Files to scan. Text is read from stdin when none are given.
    paths: Vec<PathBuf>,

    /// Match this text directly instead of reading files
    #[arg(long, conflicts_with = "paths")]
    text: Option<String>,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    log_file_path: Option<String>,

    /// Print full reports as JSON
    #[arg(long)]
    json: bool,

    /// Exit with an error if any entry could not be read
    #[arg(long)]
    strict: bool,
}

fn init_logging(logging: &LoggingConfig, log_file_path: Option<&str>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let Some(log_path) = log_file_path else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        return None;
    };

    let log_path = std::path::Path::new(log_path);
    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(std::path::Path::new(".")),
        log_path
            .file_name()
            .unwrap_or(std::ffi::OsStr::new("mailsift.log")),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, config_path) =
        MailsiftConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let _guard = init_logging(&config.logging, args.log_file_path.as_deref());
    debug!("Loaded config from {}", config_path.display());

    let extractor = EmailExtractor::new(config.extractor.clone());

    if args.paths.is_empty() {
        let text = match args.text {
            Some(text) => text,
            None => {
                let mut text = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut text)
                    .await
                    .context("Failed to read stdin")?;
                text
            }
        };

        let emails = extractor.extract_text(&text);
        println!("{}", emails.join(&config.output.separator));
        return Ok(());
    }

    let reports: Vec<ExtractionReport> = futures::future::join_all(
        args.paths.iter().map(|path| extractor.extract_path(path)),
    )
    .await;

    let format = if args.json {
        OutputFormat::Json
    } else {
        config.output.format
    };
    println!(
        "{}",
        output::render(&reports, format, &config.output.separator)?
    );

    let failures = output::failure_lines(&reports);
    for line in &failures {
        eprintln!("{line}");
    }
    info!(
        "Scanned {} inputs, {} entries failed",
        reports.len(),
        failures.len()
    );

    if args.strict && !failures.is_empty() {
        bail!("{} entries could not be read", failures.len());
    }

    Ok(())
}
