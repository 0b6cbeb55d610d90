//! Command-line interface for `MapCodec`, the compressed map payload codec.
//!
//! This binary wraps the [`mapcodec_core`] library for the site build: it
//! compresses the authored map dataset into the published transport artifact,
//! expands an artifact back into JSON for inspection, and reports what an
//! artifact contains.
//!
//! # Architecture
//!
//! The CLI is built using [`clap`] for argument parsing and [`tracing`] for structured logging.
//! It parses arguments, configures logging, builds a [`CodecConfig`] from flags, environment
//! and defaults, and delegates to command handlers.
//!
//! # Available Commands
//!
//! - `compress` - Encode the source dataset JSON into the transport artifact
//! - `decompress` - Decode an artifact (file or URL) into a JSON file
//! - `info` - Display artifact sizes, encoding and top-level contents
//! - `formats` - List the known payload encodings and their capabilities

mod display;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tabled::Table;
use tracing::{Level, debug, info};
use tracing_log::LogTracer;
use tracing_subscriber::FmtSubscriber;

use mapcodec_core::config::{DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_DECOMPRESSED_SIZE};
use mapcodec_core::formats::get_formats;
use mapcodec_core::{CodecConfig, MapCodecError, operations};

#[derive(Parser)]
#[command(
    name = "mapcodec",
    version,
    about = "Compress and decompress map payload artifacts",
    long_about = "MapCodec encodes the authored map dataset into a base64 LZ4 artifact\n\
                  and decodes published artifacts back into JSON."
)]
/// Command-line arguments and options for the `MapCodec` CLI.
///
/// Global flags control logging verbosity and the limits applied to every
/// command.
struct Cli {
    /// Enable verbose (INFO level) logging output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug (DEBUG level) logging output with detailed diagnostics.
    #[arg(short, long, global = true)]
    debug: bool,

    /// Largest decompressed payload accepted, in bytes.
    #[arg(
        long,
        global = true,
        value_name = "BYTES",
        env = "MAPCODEC_MAX_SIZE",
        default_value_t = DEFAULT_MAX_DECOMPRESSED_SIZE
    )]
    max_size: usize,

    /// Timeout for fetching artifacts over HTTP, in seconds.
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs()
    )]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the `MapCodec` CLI.
#[derive(Subcommand)]
enum Commands {
    /// Compresses the source dataset JSON into the transport artifact.
    ///
    /// The artifact is written to a temporary file and renamed into place,
    /// so an interrupted run never leaves a partial artifact.
    Compress {
        /// Path to the authored dataset JSON (defaults to the site build's source).
        #[arg(short, long, value_name = "SOURCE", env = "MAPCODEC_SOURCE")]
        input: Option<PathBuf>,

        /// Path for the transport artifact (defaults to the published artifact).
        #[arg(short, long, value_name = "ARTIFACT", env = "MAPCODEC_ARTIFACT")]
        output: Option<PathBuf>,
    },

    /// Decompresses an artifact into a JSON file for inspection.
    Decompress {
        /// Path or http(s) URL of the artifact (defaults to the published artifact).
        #[arg(short, long, value_name = "ARTIFACT", env = "MAPCODEC_ARTIFACT")]
        input: Option<String>,

        /// Path for the decompressed JSON (defaults to the debug copy next to the artifact).
        #[arg(short, long, value_name = "OUTPUT", env = "MAPCODEC_DECOMPRESSED")]
        output: Option<PathBuf>,

        /// Indent the JSON instead of writing it minified.
        #[arg(long)]
        pretty: bool,
    },

    /// Displays sizes, encoding and top-level contents of an artifact.
    Info {
        /// Path or http(s) URL of the artifact (defaults to the published artifact).
        #[arg(value_name = "ARTIFACT", env = "MAPCODEC_ARTIFACT")]
        input: Option<String>,
    },

    /// Lists the known payload encodings and their capabilities.
    Formats,
}

/// Entry point for the `MapCodec` command-line interface.
///
/// Parses arguments, configures logging, and dispatches to the command
/// handler. Codec failures are reported with a user-facing message and a
/// suggestion before exiting with status 1.
///
/// # Errors
///
/// Returns an error if the logging system cannot be initialized or a
/// non-codec failure occurs.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    // Bridge logs from the `log` crate (used by mapcodec-core) to `tracing`.
    LogTracer::init()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.codec_config();

    let outcome = match cli.command {
        Commands::Compress { .. } => handle_compress(&config),
        Commands::Decompress { input, pretty, .. } => {
            handle_decompress(&artifact_location(input, &config), pretty, &config).await
        },
        Commands::Info { input } => handle_info(&artifact_location(input, &config), &config).await,
        Commands::Formats => handle_formats(),
    };

    if let Err(err) = outcome {
        if let Some(codec_err) = err.downcast_ref::<MapCodecError>() {
            eprintln!("Error: {}", codec_err.user_message());
            if let Some(hint) = codec_err.recovery_suggestion() {
                eprintln!("Hint: {hint}");
            }
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}

impl Cli {
    /// Layers the parsed flags and environment over [`CodecConfig::default`].
    fn codec_config(&self) -> CodecConfig {
        let mut config = CodecConfig::default()
            .with_max_decompressed_size(self.max_size)
            .with_fetch_timeout(Duration::from_secs(self.timeout));

        match &self.command {
            Commands::Compress { input, output } => {
                if let Some(path) = input {
                    config = config.with_source_path(path);
                }
                if let Some(path) = output {
                    config = config.with_artifact_path(path);
                }
            },
            Commands::Decompress { output, .. } => {
                if let Some(path) = output {
                    config = config.with_decompressed_path(path);
                }
            },
            Commands::Info { .. } | Commands::Formats => {},
        }
        config
    }
}

/// Artifact location given on the command line, or the configured artifact path.
fn artifact_location(input: Option<String>, config: &CodecConfig) -> String {
    input.unwrap_or_else(|| config.artifact_path.display().to_string())
}

fn handle_compress(config: &CodecConfig) -> Result<()> {
    info!("Compress command:");
    info!("Source: {}", config.source_path.display());
    info!("Artifact: {}", config.artifact_path.display());

    let report = operations::compress_map(&config.source_path, &config.artifact_path, config)?;
    display::display_encode_report(&report, &config.source_path, &config.artifact_path);
    Ok(())
}

async fn handle_decompress(input: &str, pretty: bool, config: &CodecConfig) -> Result<()> {
    let output = &config.decompressed_path;
    info!("Decompress command:");
    info!("Artifact: {input}");
    info!("Output: {}", output.display());
    debug!("Pretty: {pretty}");

    let artifact = operations::decompress_map(input, output, config, pretty).await?;
    println!(
        "Wrote {} bytes of JSON to {}",
        artifact.decompressed_bytes,
        output.display()
    );
    Ok(())
}

async fn handle_info(input: &str, config: &CodecConfig) -> Result<()> {
    info!("Info command:");
    info!("Artifact: {input}");

    let artifact = operations::inspect_artifact(input, config).await?;
    display::display_artifact_info(&artifact);
    Ok(())
}

/// Handles the `formats` subcommand by displaying a table of known encodings.
///
/// # Errors
///
/// This function returns a `Result` for consistency with other command handlers,
/// but does not perform any operations that fail.
#[allow(clippy::unnecessary_wraps)]
fn handle_formats() -> Result<()> {
    let formats = get_formats();

    println!("\nKnown Formats ({} total):\n", formats.len());
    let table = Table::new(display::format_rows(&formats)).to_string();
    println!("{table}");

    Ok(())
}
