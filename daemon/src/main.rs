//! AGORA daemon — entry point for driving a governed voting session.

mod config;
mod session;

use agora_engine::VotingEngine;
use agora_service::EngineService;
use clap::Parser;
use config::SessionConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agora-daemon", about = "AGORA governed voting daemon")]
struct Cli {
    /// Address of the administrator driving the workflow.
    /// When a config file is provided, defaults to the file's admin value.
    #[arg(long, env = "AGORA_ADMIN")]
    admin: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// When a config file is provided, defaults to the file's value.
    #[arg(long, env = "AGORA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Emit machine-readable JSON result lines.
    #[arg(long, env = "AGORA_JSON")]
    json: bool,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run a voting session.
    #[command(name = "session")]
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(clap::Subcommand)]
enum SessionAction {
    /// Read commands from stdin until EOF or `quit`.
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config: Option<SessionConfig> = match &cli.config {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SessionConfig>(&contents) {
                Ok(cfg) => Some(cfg),
                Err(e) => anyhow::bail!("failed to parse config file {}: {e}", path.display()),
            },
            Err(e) => anyhow::bail!("failed to read config file {}: {e}", path.display()),
        },
        None => None,
    };

    let base = file_config.unwrap_or_default();
    let config = base.with_overrides(cli.admin, cli.log_level, cli.json);

    agora_utils::init_tracing(&config.log_level, config.json);
    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    match cli.command {
        Command::Session { action } => match action {
            SessionAction::Run => {
                let admin = config.admin_address()?;
                tracing::info!(admin = %admin, "starting voting session");

                let mut engine = VotingEngine::new(admin.clone());
                engine.subscribe(Box::new(|event| {
                    tracing::info!(?event, "engine event");
                }));

                let (handle, join) = EngineService::spawn(engine);
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                session::run(handle, admin, stdin, config.json).await?;
                join.await?;

                tracing::info!("agora daemon exited cleanly");
            }
        },
    }

    Ok(())
}
