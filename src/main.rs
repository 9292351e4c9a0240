//! Kyouen - unified CLI
//!
//! Stage checks, registration and clears from the command line.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use kyouen::Board;
use kyouen_server::{ServerConfig, StageClear, StageRecord, StageRepository, StageService};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Check { size, stage } => run_check(size, &stage),
        Command::Orbit { size, stage } => run_orbit(size, &stage),
        command => {
            let service = open_service(&cli.config, cli.db_path)?;
            run_registry_command(&service, command)
        }
    }
}

#[instrument]
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,kyouen=debug,kyouen_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Search a stage without touching the registry
#[instrument]
fn run_check(size: usize, stage: &str) -> Result<()> {
    let board = Board::parse(size, stage)?;
    info!(stones = board.stone_count(), "Checking stage");
    println!("{}\n", board.display());

    match board.find_kyouen() {
        Some(kyouen) => println!("{}", serde_json::to_string_pretty(&kyouen)?),
        None => println!("no kyouen"),
    }
    Ok(())
}

/// Print the orbit in query order
#[instrument]
fn run_orbit(size: usize, stage: &str) -> Result<()> {
    let board = Board::parse(size, stage)?;
    for variant in board.orbit() {
        println!("{}", variant.to_stage_string());
    }
    Ok(())
}

#[instrument(skip(db_path))]
fn open_service(config_path: &std::path::Path, db_path: Option<String>) -> Result<StageService> {
    let mut config = ServerConfig::load(config_path)?;
    if let Some(db_path) = db_path {
        info!(db_path = %db_path, "Overriding database path");
        config = config.with_db_path(db_path);
    }

    let repository = StageRepository::new(config.db_path().clone())?;
    repository.migrate()?;
    Ok(StageService::new(repository, config))
}

#[instrument(skip(service))]
fn run_registry_command(service: &StageService, command: Command) -> Result<()> {
    match command {
        Command::Register {
            size,
            stage,
            creator,
        } => {
            let registration = service.create_stage(size, &stage, &creator)?;
            println!("registered stage {}", registration.record().stage_no());
            println!("{}", serde_json::to_string_pretty(registration.kyouen())?);
        }
        Command::Clear {
            stage_no,
            stage,
            user,
        } => {
            let outcome = service.clear_stage(stage_no, &stage, &user)?;
            if *outcome.newly_recorded() {
                println!("stage {} cleared by {}", outcome.stage_no(), user);
            } else {
                println!("stage {} was already cleared by {}", outcome.stage_no(), user);
            }
        }
        Command::List {
            start,
            limit,
            recent,
        } => {
            let stages = if recent {
                service.recent_stages(limit)?
            } else {
                service.list_stages(start, limit)?
            };
            print_stages(&stages);
        }
        Command::Stats { user } => {
            let stats = service.stats(user.as_deref())?;
            println!("stages: {}", stats.stage_count());
            if let Some(user) = user {
                let cleared: Vec<String> = stats.clears().iter().map(|c| c.stage_no().to_string()).collect();
                println!("{} cleared {}: [{}]", user, cleared.len(), cleared.join(", "));
            }
        }
        Command::SyncClears { user, stage_nos } => {
            let clears = service.sync_clears(&user, &stage_nos)?;
            println!("{} has cleared {} stages", user, clears.len());
            print_clears(&clears);
        }
        Command::Activity { limit } => {
            let clears = service.recent_clears(limit)?;
            print_clears(&clears);
        }
        Command::Check { .. } | Command::Orbit { .. } => {
            anyhow::bail!("command does not use the registry")
        }
    }
    Ok(())
}

fn print_stages(stages: &[StageRecord]) {
    for stage in stages {
        println!(
            "{:>5}  {}x{}  {}  {}  {}",
            stage.stage_no(),
            stage.size(),
            stage.size(),
            stage.stage(),
            stage.creator(),
            stage.regist_date()
        );
    }
}

fn print_clears(clears: &[StageClear]) {
    for clear in clears {
        println!("{:>5}  {}  {}", clear.stage_no(), clear.user_name(), clear.cleared_at());
    }
}
