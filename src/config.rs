//! src/config.rs
//! Load and validate runtime configuration for calmcp.
//!
//! Priority: CLI flags > environment / .env > defaults.

use crate::{cli::Cli, AppError, Result};
use calmcp_tools::GoogleConfig;
use chrono_tz::Tz;
use secrecy::SecretString;
use std::env;
use url::Url;

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/oauth2callback";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug)]
pub struct Config {
    // Google OAuth
    pub google: GoogleConfig,

    // Calendar
    pub time_zone: Tz, // attached to every start/end we write

    // Logging
    pub log_filter: String, // tracing EnvFilter directive
}

impl Config {
    /// Build from CLI flags + env; validate URLs and the zone name.
    pub fn load(cli: &Cli) -> Result<Self> {
        match &cli.env_file {
            | Some(path) => {
                dotenvy::from_path(path).map_err(|source| AppError::EnvFile {
                    path: path.clone(),
                    source,
                })?;
            },
            // No error if absent.
            | None => {
                let _ = dotenvy::dotenv();
            },
        }

        Self::from_lookup(cli, |key| env::var(key).ok())
    }

    /// Same as [`Config::load`] but reads variables through `lookup`.
    pub fn from_lookup(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let pick = |flag: &Option<String>, key: &str| {
            flag.clone()
                .or_else(|| lookup(key))
                .filter(|v| !v.trim().is_empty())
        };

        // ---- Google OAuth ----
        let client_id = pick(&cli.client_id, "GOOGLE_CLIENT_ID").ok_or(AppError::MissingEnv {
            key: "GOOGLE_CLIENT_ID",
        })?;
        let client_secret = pick(&cli.client_secret, "GOOGLE_CLIENT_SECRET").ok_or(
            AppError::MissingEnv {
                key: "GOOGLE_CLIENT_SECRET",
            },
        )?;

        let redirect_uri = pick(&cli.redirect_uri, "GOOGLE_REDIRECT_URI")
            .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());
        let redirect_uri = Url::parse(&redirect_uri)?;
        if !matches!(redirect_uri.scheme(), "http" | "https") {
            return Err(AppError::Config {
                msg: format!("GOOGLE_REDIRECT_URI must be http(s), got {redirect_uri}"),
            });
        }

        let refresh_token = pick(&cli.refresh_token, "GOOGLE_REFRESH_TOKEN").map(SecretString::new);

        // ---- Calendar ----
        let zone = pick(&cli.time_zone, "CALMCP_TIME_ZONE").unwrap_or_else(|| "UTC".to_string());
        let time_zone = zone.parse::<Tz>().map_err(|e| AppError::TimeZone {
            name: zone.clone(),
            reason: e.to_string(),
        })?;

        // ---- Logging ----
        let log_filter = pick(&cli.log_level, "CALMCP_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            google: GoogleConfig {
                client_id,
                client_secret: SecretString::new(client_secret),
                redirect_uri,
                refresh_token,
            },
            time_zone,
            log_filter,
        })
    }
}
