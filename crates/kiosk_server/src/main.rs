//! Kiosk server - CLI entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use kiosk_server::{AppState, GameRepository, router};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    initialize_tracing();

    let cli = Cli::parse();
    let repository = GameRepository::new(cli.db_path);
    repository.initialize()?;

    match cli.command {
        Command::Serve { port, host } => run_http_server(repository, host, port).await,
        Command::Leaderboard { limit } => print_leaderboard(&repository, limit),
        Command::AddFact { text } => add_fact(&repository, &text),
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,kiosk_server=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the HTTP API server until Ctrl-C.
#[instrument(skip(repository))]
async fn run_http_server(repository: GameRepository, host: String, port: u16) -> Result<()> {
    let app = router(AppState::new(repository));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!(%host, port, "Server ready at http://{}:{}/", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[instrument(skip(repository))]
fn print_leaderboard(repository: &GameRepository, limit: i64) -> Result<()> {
    let standings = repository.leaderboard(limit)?;
    if standings.is_empty() {
        println!("No entries yet");
    }
    for (rank, entry) in standings.iter().enumerate() {
        println!(
            "{:>3}. {:<20} {:>4}  (last win {})",
            rank + 1,
            entry.player_name(),
            entry.wins(),
            entry.timestamp().format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

#[instrument(skip(repository))]
fn add_fact(repository: &GameRepository, text: &str) -> Result<()> {
    let fact = repository.add_fact(text)?;
    println!("Added fact #{}", fact.id());
    Ok(())
}
