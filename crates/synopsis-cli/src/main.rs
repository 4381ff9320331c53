use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

use synopsis_acquire::config::{DEFAULT_BASE_URL, DEFAULT_SUMMARY_SELECTOR};
use synopsis_acquire::{imdb, normalize, FetchConfig, ImdbClient};
use synopsis_pipeline::RunOptions;

#[derive(Parser)]
#[command(name = "synopsis")]
#[command(about = "Fetch IMDb synopses for every movie in a MovieLens links file")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Running without a subcommand enriches the links file.
#[derive(Args)]
struct RunArgs {
    /// Links file: header row, then movieId,imdbId[,...] rows
    #[arg(short, long, default_value = "links.csv")]
    input: PathBuf,

    /// Output CSV with movieId,synopsis columns (overwritten)
    #[arg(short, long, default_value = "synopsis.csv")]
    output: PathBuf,

    /// URL prefix the IMDb id is appended to
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// CSS selector of the element holding the synopsis
    #[arg(long, default_value = DEFAULT_SUMMARY_SELECTOR)]
    selector: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Keep a copy of every fetched page in this directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Write a JSON run report (counts and per-movie failures) to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Only process the first N movies
    #[arg(long)]
    limit: Option<usize>,

    /// NFC-normalize synopses and fold whitespace runs into single spaces
    #[arg(long)]
    normalize: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the synopsis from a saved title page (e.g., one from --cache-dir)
    Extract {
        /// Path to the HTML file
        file: PathBuf,

        /// CSS selector of the element holding the synopsis
        #[arg(long, default_value = DEFAULT_SUMMARY_SELECTOR)]
        selector: String,

        /// NFC-normalize the synopsis and fold whitespace runs into single spaces
        #[arg(long)]
        normalize: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.utc);

    match cli.command {
        Some(Commands::Extract {
            file,
            selector,
            normalize,
        }) => {
            tracing::info!(file = %file.display(), "Extracting synopsis");
            extract(&file, &selector, normalize)?;
        }
        None => {
            enrich(cli.run).await?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &LogLevel, utc: bool) {
    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn,hyper_util=info",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn,hyper_util=info",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}

async fn enrich(args: RunArgs) -> Result<()> {
    let config = FetchConfig {
        base_url: args.base_url,
        summary_selector: args.selector,
        timeout: Duration::from_secs(args.timeout),
        cache_dir: args.cache_dir,
        normalize: args.normalize,
        ..FetchConfig::default()
    };
    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        base_url = %config.base_url,
        "Fetching synopses"
    );
    let client = ImdbClient::new(config)?;

    let options = RunOptions {
        input: args.input,
        output: args.output,
        limit: args.limit,
    };
    let report = synopsis_pipeline::run(&options, &client).await?;

    if let Some(path) = &args.report {
        synopsis_pipeline::report::write_report(&report, path)?;
    }

    Ok(())
}

fn extract(file: &Path, selector: &str, normalize_text: bool) -> Result<()> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let selector = imdb::parse_selector(selector)?;

    match imdb::extract_synopsis(&html, &selector) {
        Some(synopsis) if normalize_text => {
            println!("{}", normalize::normalize_synopsis(&synopsis));
            Ok(())
        }
        Some(synopsis) => {
            println!("{synopsis}");
            Ok(())
        }
        None => anyhow::bail!("No synopsis found in {}", file.display()),
    }
}
