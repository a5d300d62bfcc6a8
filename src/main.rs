// src/main.rs
// Pulse - Tool observability hooks for Claude Code

use anyhow::Result;
use clap::{Parser, Subcommand};
use pulse::config::HookConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Tool observability hooks for Claude Code")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Claude Code hook handlers
    Hook {
        #[command(subcommand)]
        action: HookAction,
    },
}

#[derive(Subcommand)]
enum HookAction {
    /// Handle PostToolUse hooks - logs the event and forwards analytics
    PostTool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (global first, then project - project overrides)
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".pulse/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Hooks share stdout with the host protocol; keep logging quiet and on stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Hook { action } => match action {
            HookAction::PostTool => {
                let config = HookConfig::from_env();
                // A lifecycle hook must never fail the host operation it is
                // attached to; log and exit 0 no matter what went wrong
                if let Err(e) = pulse::hooks::post_tool::run(&config).await {
                    tracing::warn!("PostToolUse hook failed: {e:#}");
                }
            }
        },
    }

    Ok(())
}
