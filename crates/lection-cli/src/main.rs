use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lection")]
#[command(about = "Scripture passage fetch and cleanup tool")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a verse range from a passage endpoint and print its text
    Fetch {
        /// Verse range identifier (e.g., "43 3:16-3:17"; books below ten arrive zero-padded)
        #[arg(short, long)]
        range: String,

        /// Endpoint URL prefix the range token is appended to
        #[arg(short, long)]
        endpoint: String,

        /// Keep chapter and verse numbers in the output
        #[arg(long)]
        verse_numbers: bool,

        /// Also save the raw HTML fragment to this path before cleanup
        #[arg(long)]
        dump_html: Option<String>,
    },

    /// Clean up a saved passage HTML fragment and print its text
    Strip {
        /// Path to a file containing the HTML fragment
        #[arg(short, long)]
        input: String,

        /// Keep chapter and verse numbers in the output
        #[arg(long)]
        verse_numbers: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
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

    match cli.command {
        Commands::Fetch {
            range,
            endpoint,
            verse_numbers,
            dump_html,
        } => {
            tracing::info!(range = %range, "Fetching verse text");
            let text = if let Some(path) = dump_html {
                match lection_acquire::fetch_passage_html(&range, &endpoint).await? {
                    Some(html) => {
                        std::fs::write(&path, &html)?;
                        tracing::info!(path = %path, bytes = html.len(), "Saved raw fragment");
                        lection_acquire::strip_verse_text(&html, verse_numbers).unwrap_or_default()
                    }
                    None => String::new(),
                }
            } else {
                lection_acquire::fetch_verse(&range, verse_numbers, &endpoint).await?
            };

            if text.is_empty() {
                tracing::warn!(range = %range, "No text for range");
            } else {
                println!("{text}");
            }
        }
        Commands::Strip {
            input,
            verse_numbers,
        } => {
            tracing::info!(input = %input, "Cleaning saved fragment");
            let html = std::fs::read_to_string(&input)?;
            match lection_acquire::strip_verse_text(&html, verse_numbers) {
                Some(text) => println!("{text}"),
                None => tracing::warn!("Fragment contained no text"),
            }
        }
    }

    Ok(())
}
