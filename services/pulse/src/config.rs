use std::time::Duration;

use anyhow::Context as _;

use crate::domain::types::DailyLogMode;

/// Pulse service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct PulseConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `PULSE_PORT`.
    pub pulse_port: u16,
    /// Base URL of the identity provider. Env var: `IDENTITY_URL`.
    pub identity_url: String,
    /// Timeout applied to every outbound HTTP call (default 10s).
    /// Env var: `HTTP_TIMEOUT_SECS`.
    pub http_timeout: Duration,
    pub settings: PulseSettings,
}

/// Behavioural knobs handed to usecases through `AppState`.
#[derive(Debug, Clone, Default)]
pub struct PulseSettings {
    /// The designated super-admin, always resolved as admin.
    /// Env var: `SUPER_ADMIN_EMAIL`.
    pub super_admin_email: Option<String>,
    /// Env var: `DAILY_LOG_MODE` (`upsert` | `append`).
    pub daily_log_mode: DailyLogMode,
    /// Env var: `IP_LOOKUP_URL`.
    pub ip_lookup_url: String,
    /// Generative analysis endpoint. Env var: `ANALYSIS_URL`.
    pub analysis_url: Option<String>,
}

pub const DEFAULT_IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

impl PulseConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let daily_log_mode = match var("DAILY_LOG_MODE") {
            Some(v) => v.parse().context("DAILY_LOG_MODE")?,
            None => DailyLogMode::default(),
        };

        Ok(Self {
            database_url: var("DATABASE_URL").context("DATABASE_URL must be set")?,
            pulse_port: var("PULSE_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            identity_url: var("IDENTITY_URL").context("IDENTITY_URL must be set")?,
            http_timeout: Duration::from_secs(
                var("HTTP_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
            settings: PulseSettings {
                super_admin_email: var("SUPER_ADMIN_EMAIL").map(|v| v.trim().to_owned()),
                daily_log_mode,
                ip_lookup_url: var("IP_LOOKUP_URL")
                    .unwrap_or_else(|| DEFAULT_IP_LOOKUP_URL.to_owned()),
                analysis_url: var("ANALYSIS_URL"),
            },
        })
    }
}
