//! Content-Agent main entry point
//!
//! Interactive command-line front end: asks for a topic, shows the drafted
//! post, then publishes or schedules it on the selected platforms.

use anyhow::Context;
use chrono_tz::Tz;
use clap::Parser;
use content_agent::config::{load_config_with_hash, Config, Credentials};
use content_agent::output::{print_draft, print_report};
use content_agent::pipeline::{Draft, Operator, Pipeline, RunSummary};
use content_agent::publisher::PlatformSet;
use dialoguer::{Confirm, Input};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Content-Agent: crawl a site, draft a post, publish it
///
/// Crawls the configured website for context, drafts a caption and body with
/// an AI model, and posts them to Facebook, Instagram, Twitter and LinkedIn,
/// now or at a scheduled time.
#[derive(Parser, Debug)]
#[command(name = "content-agent")]
#[command(version)]
#[command(about = "Crawl a site, draft a social post, publish it", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let credentials = Credentials::from_env();
    let missing = credentials.missing();
    if !missing.is_empty() {
        tracing::warn!("Unset credentials: {}", missing.join(", "));
    }

    let pipeline = Pipeline::from_config(config, &credentials)?;
    let mut operator = TerminalOperator;

    match pipeline.run(&mut operator).await? {
        RunSummary::Aborted => println!("Post cancelled."),
        RunSummary::Published(report) | RunSummary::Scheduled(report) => print_report(&report),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("content_agent=info,warn"),
            1 => EnvFilter::new("content_agent=debug,info"),
            2 => EnvFilter::new("content_agent=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prompts on the terminal
struct TerminalOperator;

impl Operator for TerminalOperator {
    fn topic(&mut self) -> io::Result<String> {
        Input::new()
            .with_prompt("Enter topic for the content")
            .interact_text()
            .map_err(into_io)
    }

    fn review_draft(&mut self, draft: &Draft) -> io::Result<bool> {
        print_draft(draft);
        Confirm::new()
            .with_prompt("Do you want to proceed with this content?")
            .default(true)
            .interact()
            .map_err(into_io)
    }

    fn platforms(&mut self) -> io::Result<PlatformSet> {
        let input: String = Input::new()
            .with_prompt("Which platforms? (facebook, instagram, twitter, linkedin, or all)")
            .default("all".to_string())
            .validate_with(|s: &String| PlatformSet::parse(s).map(|_| ()))
            .interact_text()
            .map_err(into_io)?;

        PlatformSet::parse(&input).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }

    fn wants_schedule(&mut self) -> io::Result<bool> {
        Confirm::new()
            .with_prompt("Do you want to schedule the post?")
            .default(false)
            .interact()
            .map_err(into_io)
    }

    fn publish_time(&mut self, zone: Tz) -> io::Result<String> {
        Input::new()
            .with_prompt(format!("Enter post time in {} (YYYY-MM-DD HH:MM)", zone))
            .interact_text()
            .map_err(into_io)
    }
}

fn into_io(e: dialoguer::Error) -> io::Error {
    match e {
        dialoguer::Error::IO(e) => e,
    }
}
