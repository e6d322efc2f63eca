use std::time::Duration;

use anyhow::Context;

use crate::Result;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_protocol: String,
    pub server_domain: String,
    pub server_port: u16,
    pub server_host_uri: String,

    /// Path the game's routes are mounted under, e.g. `/guessit`.
    pub app_alias: String,
    pub static_dir: String,
    pub production_mode: bool,

    pub session_idle: Duration,
    pub session_capacity: u64,
    pub request_timeout: Duration,

    pub random_seed: Option<u64>,
}

impl Config {
    /// Prefix for links inside the game; empty when mounted at the root.
    pub fn base(&self) -> &str {
        if self.app_alias == "/" {
            return "";
        }

        return &self.app_alias;
    }

    /// Absolute path of a route inside the game, e.g. `path("/game")`.
    pub fn path(&self, route: &str) -> String {
        if route == "/" && !self.base().is_empty() {
            return self.base().to_string();
        }

        return format!("{}{}", self.base(), route);
    }
}

pub fn build() -> Result<Config> {
    dotenv::dotenv().ok();

    return from_lookup(|key| std::env::var(key).ok());
}

pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let get = |key: &str, default: &str| -> String {
        lookup(key)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let server_protocol = get("SERVER_PROTOCOL", "http");
    let server_domain = get("SERVER_DOMAIN", "localhost");
    let server_port: u16 = get("SERVER_PORT", "8000")
        .parse()
        .context("SERVER_PORT must be a port number")?;

    let server_host_uri = format!("{server_protocol}://{server_domain}:{server_port}");

    let app_alias = normalize_alias(&get("APP_ALIAS", "/guessit"));

    let production_mode = get("PRODUCTION_MODE", "false")
        .parse()
        .context("PRODUCTION_MODE must be true or false")?;

    let session_idle_secs: u64 = get("SESSION_IDLE_SECS", "1800")
        .parse()
        .context("SESSION_IDLE_SECS must be a number of seconds")?;
    let session_capacity: u64 = get("SESSION_CAPACITY", "2000")
        .parse()
        .context("SESSION_CAPACITY must be a number")?;
    let request_timeout_secs: u64 = get("REQUEST_TIMEOUT_SECS", "10")
        .parse()
        .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?;

    let random_seed: Option<u64> = match lookup("RANDOM_SEED").filter(|v| !v.trim().is_empty()) {
        Some(seed) => Some(seed.trim().parse().context("RANDOM_SEED must be a number")?),
        None => None,
    };

    return Ok(Config {
        server_protocol,
        server_domain,
        server_port,
        server_host_uri,

        app_alias,
        static_dir: get("STATIC_DIR", "assets"),
        production_mode,

        session_idle: Duration::from_secs(session_idle_secs),
        session_capacity,
        request_timeout: Duration::from_secs(request_timeout_secs),

        random_seed,
    });
}

fn normalize_alias(alias: &str) -> String {
    let trimmed = alias.trim().trim_matches('/');

    if trimmed.is_empty() {
        return "/".to_string();
    }

    return format!("/{trimmed}");
}
