use std::env;

use chrono_tz::Tz;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream Stats API base URL, e.g. `https://statsapi.example.com`.
    pub stats_api_base_url: String,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// IANA timezone used when formatting game dates and times.
    pub display_tz: Tz,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let stats_api_base_url = env::var("STATS_API_BASE_URL")
            .map_err(|_| "STATS_API_BASE_URL must be set".to_string())?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let display_tz = match env::var("DISPLAY_TIMEZONE") {
            Ok(name) => name
                .parse::<Tz>()
                .map_err(|e| format!("DISPLAY_TIMEZONE is not a valid IANA zone: {}", e))?,
            Err(_) => chrono_tz::UTC,
        };
        Ok(Self {
            stats_api_base_url,
            bind_addr,
            display_tz,
        })
    }
}
