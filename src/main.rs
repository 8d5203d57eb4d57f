//! lamco-xscp - Webflow HTML embed clipboard tool
//!
//! Entry point for the command-line binary.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lamco_xscp::clipboard::{ClipboardWriter, CopyOutcome, CopyPlatform, MemoryClipboard, Ownership, SystemClipboard};
use lamco_xscp::config::Config;
use lamco_xscp::session::ConverterSession;
use lamco_xscp::utils::format_user_error;

/// Command-line arguments for lamco-xscp
#[derive(Parser, Debug)]
#[command(name = "lamco-xscp")]
#[command(version, about = "Wrap HTML snippets as Webflow embed clipboard payloads", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true, env = "LAMCO_XSCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Write logs to file (in addition to stderr)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the XscpData payload for a snippet
    Convert {
        /// Read the snippet from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the payload to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Put the payload, its JSON twin and the raw snippet on the clipboard
    Copy {
        /// Read the snippet from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Copy this (possibly hand-edited) payload text verbatim
        #[arg(short, long)]
        payload: Option<PathBuf>,

        /// Clipboard backend (system|memory)
        #[arg(short, long)]
        backend: Option<String>,

        /// Give up if the copy event is not delivered within this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let (config, load_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default_config(), Some(e)),
    };

    init_logging(&args, &config)?;

    debug!(
        "lamco-xscp v{} (built {}, commit {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE"),
        env!("GIT_HASH")
    );
    if let Some(e) = load_error {
        warn!("Failed to load config: {:#}, using defaults", e);
    }

    let result = match args.command {
        Command::Convert { input, output } => run_convert(input.as_deref(), output.as_deref()),
        Command::Copy {
            input,
            payload,
            backend,
            timeout_ms,
        } => {
            let config = config.with_overrides(backend, timeout_ms);
            run_copy(&config, input.as_deref(), payload.as_deref()).await
        }
    };

    if let Err(e) = &result {
        eprintln!("{}", format_user_error(e));
    }
    result
}

fn run_convert(input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let raw = read_input(input)?;

    let mut session = ConverterSession::new();
    session.paste(&raw);
    debug!("Payload is {} characters", session.output_chars());

    match output {
        Some(path) => std::fs::write(path, session.output())
            .with_context(|| format!("Failed to write payload: {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", session.output()).context("Failed to write payload to stdout")?;
        }
    }

    Ok(())
}

async fn run_copy(config: &Config, input: Option<&Path>, payload: Option<&Path>) -> Result<()> {
    config.validate().context("Invalid config")?;
    if !config.clipboard.enabled {
        anyhow::bail!("Clipboard writes are disabled by config (clipboard.enabled = false)");
    }

    let raw = read_input(input)?;
    let mut session = ConverterSession::from_config(config);
    session.paste(&raw);

    if let Some(path) = payload {
        let edited = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload file: {}", path.display()))?;
        session.edit_output(&edited);
    }

    match config.clipboard.backend.as_str() {
        "memory" => {
            let writer = ClipboardWriter::with_timeout(MemoryClipboard::new(), config.copy_timeout());
            let outcome = copy_with(&mut session, &writer).await?;

            if let Some(tx) = writer.platform().last_transaction() {
                for entry in tx.entries() {
                    eprintln!("  {:<20} {} bytes", entry.mime_type, entry.data.len());
                }
            }
            report(outcome);
        }
        _ => {
            let writer = ClipboardWriter::with_timeout(SystemClipboard::new(config.ownership()), config.copy_timeout());
            let outcome = copy_with(&mut session, &writer).await?;
            report(outcome);

            // The owner thread serves paste requests only while the process lives
            if outcome.is_issued() {
                hold_clipboard(writer.platform()).await;
            }
        }
    }

    Ok(())
}

async fn copy_with<P: CopyPlatform>(session: &mut ConverterSession, writer: &ClipboardWriter<P>) -> Result<CopyOutcome> {
    info!(
        backend = writer.platform().name(),
        chars = session.output_chars(),
        "Copying payload"
    );
    let outcome = session
        .copy(writer)
        .await
        .context("Failed to copy payload to clipboard")?;
    Ok(outcome)
}

async fn hold_clipboard(platform: &SystemClipboard) {
    match platform.ownership() {
        Ownership::UntilReplaced => {
            eprintln!("Holding the clipboard until something else is copied. Press Ctrl-C to release it.")
        }
        Ownership::Linger(linger) => debug!("Holding clipboard for {:?}", linger),
    }

    tokio::select! {
        _ = platform.wait_released() => debug!("Clipboard released"),
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!("Failed to listen for Ctrl-C: {}", e);
            }
            info!("Interrupted, releasing clipboard");
        }
    }
}

fn report(outcome: CopyOutcome) {
    match outcome {
        CopyOutcome::Confirmed => eprintln!("Copied! Paste into the Webflow Designer."),
        CopyOutcome::Issued => eprintln!("Copy issued (the clipboard did not confirm it)."),
        CopyOutcome::Skipped => eprintln!("Nothing to copy."),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read input from stdin")?;
            Ok(raw)
        }
    }
}

fn init_logging(args: &Args, config: &Config) -> Result<()> {
    use std::fs::File;

    let log_level = match args.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let log_format = args.log_format.as_deref().unwrap_or(config.logging.format.as_str());
    let log_file = args.log_file.as_ref().or(config.logging.log_file.as_ref());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Both lamco_xscp and lamco_clipboard_mime match the "lamco" prefix
        tracing_subscriber::EnvFilter::new(format!("lamco={level},warn", level = log_level))
    });

    // stdout carries the payload, so logs go to stderr
    if let Some(log_file_path) = log_file {
        let file = File::create(log_file_path)
            .with_context(|| format!("Failed to create log file: {}", log_file_path.display()))?;

        match log_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            "pretty" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                    .with(tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false))
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
        }
        info!("Logging to file: {}", log_file_path.display());
    } else {
        match log_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                    .init();
            }
            "pretty" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
                    .init();
            }
        }
    }

    Ok(())
}
