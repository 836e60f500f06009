use clap::{Parser, Subcommand};

use crate::auth;
use crate::config;
use crate::database::DatabaseManager;

#[derive(Parser)]
#[command(name = "jobly-api")]
#[command(about = "Jobly API - companies and jobs REST backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Bind address (defaults to api.host)")]
        host: Option<String>,
        #[arg(long, help = "Port (defaults to api.port / PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Issue a signed token for a user")]
    Token {
        #[arg(help = "Username to embed in the token")]
        username: String,
        #[arg(long, help = "Grant admin rights")]
        admin: bool,
    },

    #[command(about = "Create the companies and jobs tables")]
    Schema,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { host, port } => serve(host, port).await,
        Commands::Token { username, admin } => {
            let token = auth::create_token(&username, admin)?;
            println!("{}", token);
            Ok(())
        }
        Commands::Schema => {
            DatabaseManager::apply_schema().await?;
            DatabaseManager::close().await;
            Ok(())
        }
    }
}

async fn serve(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let settings = config::config();
    tracing::info!("Starting Jobly API in {:?} mode", settings.environment);

    if settings.security.jwt_secret.is_empty() {
        if crate::is_production!() {
            anyhow::bail!("SECRET_KEY must be set in production");
        }
        tracing::warn!("SECRET_KEY is empty; every token will be rejected");
    }

    let host = host.unwrap_or_else(|| settings.api.host.clone());
    let port = port.unwrap_or(settings.api.port);
    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("Jobly API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, crate::app())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    DatabaseManager::close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["jobly-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_token_and_serve_flags() {
        let cli = Cli::try_parse_from(["jobly-api", "token", "ops", "--admin"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Token { ref username, admin: true }) if username == "ops"));

        let cli = Cli::try_parse_from(["jobly-api", "serve", "--port", "4000"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve { host: None, port: Some(4000) })));
    }
}
