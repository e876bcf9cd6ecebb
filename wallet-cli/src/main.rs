//! Wallet CLI
//!
//! Replays ledger command scripts against a fresh in-memory wallet:
//! - Load configuration from `.env` and the environment
//! - Initialize logging
//! - Run the script, printing each result as JSON
//! - Optionally export the accounts file at the end

mod config;
mod script;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wallet_service::{RejectPolicy, ServiceConfig, WalletService};
use wallet_types::UuidGenerator;

use crate::config::Config;
use crate::script::Session;

#[derive(Parser)]
#[command(name = "wallet")]
#[command(author, version, about = "Wallet ledger script runner", long_about = None)]
struct Cli {
    /// How rejects treat payments that are no longer in progress (permissive, strict)
    #[arg(long)]
    reject_policy: Option<RejectPolicy>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a command script against a fresh ledger
    Run {
        /// Script file, one command per line
        script: PathBuf,
        /// Export accounts to this file after the script finishes
        #[arg(long)]
        export: Option<PathBuf>,
        /// Continue past failing commands
        #[arg(long)]
        keep_going: bool,
        /// Print all accounts, payments and favorites at the end
        #[arg(long)]
        summary: bool,
    },
    /// Parse a script without running it
    Check {
        /// Script file, one command per line
        script: PathBuf,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,wallet_cli=info,wallet_service=info".into());

    // Logs go to stderr; stdout carries the JSON results.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_script(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = Config::from_env()?;
    let reject_policy = cli.reject_policy.unwrap_or(config.reject_policy);

    match cli.command {
        Commands::Check { script } => {
            let commands = script::parse_script(&read_script(&script)?)?;
            println!("✓ {} commands", commands.len());
        }

        Commands::Run {
            script,
            export,
            keep_going,
            summary,
        } => {
            let commands = script::parse_script(&read_script(&script)?)?;
            tracing::info!(
                script = %script.display(),
                commands = commands.len(),
                %reject_policy,
                "Running script"
            );

            let service = WalletService::with_config(
                UuidGenerator,
                ServiceConfig::default().with_reject_policy(reject_policy),
            );
            let mut session = Session::new(service);
            let mut failures = 0usize;

            for (line, command) in commands {
                match session.execute(command) {
                    Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                    Err(e) if keep_going => {
                        failures += 1;
                        tracing::error!(line, "Command failed: {:#}", e);
                    }
                    Err(e) => return Err(e.context(format!("line {}", line))),
                }
            }

            if let Some(path) = export.or(config.export_path) {
                session
                    .service()
                    .export_to_file(&path)
                    .with_context(|| format!("exporting to {}", path.display()))?;
                tracing::info!(path = %path.display(), "Accounts exported");
            }

            if summary {
                println!("{}", serde_json::to_string_pretty(&session.summary())?);
            }

            if failures > 0 {
                anyhow::bail!("{} command(s) failed", failures);
            }
        }
    }

    Ok(())
}
