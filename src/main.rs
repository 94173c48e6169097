use std::path::PathBuf;

use anyhow::{Context, Result};
use awscred::app::{self, render};
use awscred::check::{StsValidityChecker, ValidityChecker};
use awscred::config::{default_config_path, Overrides, ResolvedConfig};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "awscred")]
#[command(about = "Inspect, validate and clean local AWS credential profiles")]
struct Cli {
    /// Path to config file (defaults to the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Credentials file to operate on
    #[arg(long, global = true)]
    credentials_file: Option<PathBuf>,

    /// AWS config file to clean alongside the credentials file
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every profile in the credentials file
    #[command(alias = "print")]
    List {
        #[arg(long)]
        json: bool,
    },
    /// Check each profile's credentials against STS
    Check {
        #[arg(long)]
        json: bool,
    },
    /// Remove profiles with invalid credentials from both files
    Clean {
        /// Check and report, but leave the files untouched
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        json: bool,
    },
    /// Run commands from stdin with AWS_PROFILE set to PROFILE
    Apply { profile: String },
    /// Write a script to `source` for switching the current shell to PROFILE
    Script {
        profile: String,
        /// Directory for the script (defaults to the system temp dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Show resolved configuration
    Config,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

fn checker(config: &ResolvedConfig) -> impl ValidityChecker {
    StsValidityChecker::new(config.sts.clone()).with_store(config.store.clone())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = ResolvedConfig::load_or_default(
        &config_path,
        Overrides {
            credentials_file: cli.credentials_file,
            config_file: cli.config_file,
        },
    )
    .with_context(|| format!("Failed to load awscred config: {}", config_path.display()))?;

    match cli.command {
        Command::List { json } => {
            let profiles = app::list_profiles(&config.store)?;
            if json {
                print_json(&profiles)?;
            } else {
                print!("{}", render::profiles_text(&profiles));
            }
        }
        Command::Check { json } => {
            let profiles = app::list_profiles(&config.store)?;
            if json {
                let outcomes = app::check_profiles(&profiles, &checker(&config)).await;
                print_json(&outcomes)?;
            } else {
                app::check_profiles_with(&profiles, &checker(&config), |outcome| {
                    println!("{}", render::check_line(outcome));
                })
                .await;
            }
        }
        Command::Clean { dry_run, json } => {
            let report =
                app::clean_profiles(&config.store, &config.layouts(), &checker(&config), dry_run)
                    .await?;
            if json {
                print_json(&report)?;
            } else {
                print!("{}", render::clean_text(&report));
            }
        }
        Command::Apply { profile } => {
            eprintln!(
                "Running commands with {}={profile}. Type `exit` or press Ctrl-D to leave.",
                config.apply.profile_env_var
            );
            let stdin = std::io::stdin();
            let summary = app::apply_profile(&config.store, &profile, &config.apply, stdin.lock())?;
            eprintln!(
                "Ran {} command(s), {} failed",
                summary.commands, summary.failed
            );
        }
        Command::Script { profile, dir } => {
            app::find_profile(&config.store, &profile)?;
            let dir = dir.unwrap_or_else(std::env::temp_dir);
            let path = app::write_profile_script(&profile, &dir)?;
            println!("Script created: {}", path.display());
            println!("To update the environment variable, run:");
            println!("source {}", path.display());
        }
        Command::Config => {
            println!("Config file: {}", config_path.display());
            print_json(&config)?;
        }
    }

    Ok(())
}
