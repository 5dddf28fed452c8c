//! Code Mentor CLI entry point
//!
//! Runs the interactive TUI by default, or a one-shot analysis that prints
//! the endpoint's reply to stdout.

use anyhow::Result;
use clap::Parser;
use codementor_client::AnalysisClient;
use codementor_core::{AnalysisRequest, Language, MentorConfig};
use codementor_tui::{run_tui, ANALYZE_FAILED_MESSAGE};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "codementor")]
#[command(about = "Code Mentor - terminal client for the code analysis endpoint")]
#[command(
    long_about = "Paste or load source code, pick a language, and submit it to the \
analysis endpoint. The reply's explanation, improvement suggestions, and generated \
documentation are rendered in the terminal."
)]
struct Cli {
    /// Source file to preload into the code buffer
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Language submitted with the code
    #[arg(short, long, value_enum)]
    language: Option<Language>,

    /// Analysis endpoint base URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Analyze FILE (or stdin) once and print the reply instead of running the TUI
    #[arg(long)]
    oneshot: bool,

    /// With --oneshot, print the raw response JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MentorConfig::load(path)?,
        None => MentorConfig::default(),
    };
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(language) = cli.language {
        config.default_language = language;
    }

    if cli.oneshot {
        // Logging goes to stderr; the TUI path skips it because the
        // subscriber would write over the alternate screen.
        codementor_core::logging::init_logging("info")?;
        run_oneshot(&cli, &config).await
    } else {
        let initial_code = match &cli.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => String::new(),
        };
        run_tui(&config, initial_code).await
    }
}

/// Analyze once and print the reply. Exactly one request per invocation.
async fn run_oneshot(cli: &Cli, config: &MentorConfig) -> Result<()> {
    let code = match &cli.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    // Same contract as the form: empty input sends nothing.
    if code.trim().is_empty() {
        eprintln!("Nothing to analyze");
        return Ok(());
    }

    let client = AnalysisClient::from_config(config);
    let request = AnalysisRequest {
        code,
        language: config.default_language,
    };

    match client.analyze(&request).await {
        Ok(response) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("Explanation");
                println!("-----------");
                println!("{}\n", response.explanation);

                println!("Improvements");
                println!("------------");
                for (i, item) in response.improvements.iter().enumerate() {
                    println!("{:>2}. {}", i + 1, item);
                }
                if response.improvements.is_empty() {
                    println!("(none)");
                }
                println!();

                println!("Documentation");
                println!("-------------");
                println!("{}", response.documentation);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "one-shot analysis failed");
            eprintln!("{ANALYZE_FAILED_MESSAGE}");
            std::process::exit(1);
        }
    }
}
