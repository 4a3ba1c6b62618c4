//! DocAgent CLI: the main entry point.
//!
//! Starts an interactive shell. Every line is a question for the agent;
//! `exit` (or end of input) quits.

use clap::Parser;
use docagent_config::AppConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "docagent",
    about = "DocAgent: a tool-calling assistant for the terminal",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging (shows each reasoning step)
    #[arg(short, long)]
    verbose: bool,

    /// Path to a config file (default: ~/.docagent/config.toml)
    #[arg(short, long, env = "DOCAGENT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the shell.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load_with_env(path),
        None => AppConfig::load(),
    }
    .map_err(|e| format!("Failed to load config: {e}"))?;

    let agent = docagent::build_agent(&config)?;
    eprintln!("{}", docagent::banner(&config, &agent));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    docagent::run_shell(&agent, &config.shell, stdin, &mut stdout).await?;

    eprintln!("\n  Goodbye!\n");
    Ok(())
}
