use zikr_core::timezone;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Offset applied when a request carries no `timezone_offset`.
    ///
    /// Defaults to the legacy Dhaka preset (+360) that all historical data
    /// was bucketed with.
    pub default_timezone_offset_minutes: i32,
    /// Daily records older than this many days are purged by the
    /// retention job (default: `365`).
    pub retention_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                 |
    /// |-----------------------------------|-------------------------|
    /// | `HOST`                            | `0.0.0.0`               |
    /// | `PORT`                            | `3000`                  |
    /// | `CORS_ORIGINS`                    | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`            | `30`                    |
    /// | `DEFAULT_TIMEZONE_OFFSET_MINUTES` | `360` (Dhaka)           |
    /// | `RETENTION_DAYS`                  | `365`                   |
    ///
    /// Panics on malformed values; misconfiguration should fail fast at
    /// startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_timezone_offset_minutes: i32 =
            std::env::var("DEFAULT_TIMEZONE_OFFSET_MINUTES")
                .unwrap_or_else(|_| timezone::DHAKA_OFFSET_MINUTES.to_string())
                .parse()
                .expect("DEFAULT_TIMEZONE_OFFSET_MINUTES must be a valid i32");
        timezone::validate_offset(default_timezone_offset_minutes)
            .expect("DEFAULT_TIMEZONE_OFFSET_MINUTES out of range");

        let retention_days: i64 = std::env::var("RETENTION_DAYS")
            .unwrap_or_else(|_| "365".into())
            .parse()
            .expect("RETENTION_DAYS must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            default_timezone_offset_minutes,
            retention_days,
        }
    }
}
