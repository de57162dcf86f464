use anyhow::{bail, Context};
use calmcp::{
    cli::{Cli, Command},
    config::Config,
};
use calmcp_server::CalendarServer;
use calmcp_tools::{CalendarTools, GoogleCredentials, OAuthClient};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    init_tracing(&config.log_filter);

    match cli.command() {
        | Command::Serve => serve(config).await,
        | Command::AuthUrl => {
            let url = OAuthClient::new(config.google).authorization_url()?;
            println!("{url}");
            Ok(())
        },
        | Command::ExchangeCode { code } => {
            let token = OAuthClient::new(config.google)
                .exchange_code(&code)
                .await
                .context("authorization code exchange failed")?;
            match token.refresh_token {
                | Some(refresh_token) => {
                    println!("GOOGLE_REFRESH_TOKEN={refresh_token}");
                    Ok(())
                },
                | None => bail!(
                    "Google returned no refresh token; revoke the app's access and run `calmcp auth-url` again"
                ),
            }
        },
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    if config.google.refresh_token.is_none() {
        warn!("GOOGLE_REFRESH_TOKEN is not set; every tool call will fail until it is");
    }
    info!(time_zone = %config.time_zone, "starting calendar MCP server");

    let tools = CalendarTools::new(GoogleCredentials::new(config.google), config.time_zone);
    CalendarServer::new(tools).serve_stdio().await
}

/// Logs go to stderr; stdout carries the MCP stream.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
