use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// MCP server exposing Google Calendar tools over stdio.
#[derive(Debug, Parser)]
#[command(name = "calmcp", version, about)]
pub struct Cli {
    /// OAuth client id (env: GOOGLE_CLIENT_ID)
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// OAuth client secret (env: GOOGLE_CLIENT_SECRET)
    #[arg(long, global = true)]
    pub client_secret: Option<String>,

    /// OAuth redirect URI (env: GOOGLE_REDIRECT_URI)
    #[arg(long, global = true)]
    pub redirect_uri: Option<String>,

    /// Long-lived refresh token (env: GOOGLE_REFRESH_TOKEN)
    #[arg(long, global = true)]
    pub refresh_token: Option<String>,

    /// IANA zone attached to event times (env: CALMCP_TIME_ZONE)
    #[arg(long, global = true)]
    pub time_zone: Option<String>,

    /// tracing filter, e.g. `debug` or `calmcp_tools=trace` (env: CALMCP_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Read this file instead of `./.env`
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Serve the calendar tools over stdio (default)
    Serve,
    /// Print the Google consent URL used to obtain a refresh token
    AuthUrl,
    /// Exchange an authorization code for a refresh token
    ExchangeCode {
        /// The `code` query parameter from the redirect
        code: String,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
