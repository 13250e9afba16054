// src/common/config.rs
//! Runtime configuration loaded from the environment with CLI overrides

use chrono::Duration;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStoreKind {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: String,
    pub database_url: String,
    pub static_dir: PathBuf,
    pub session_lifetime: Duration,
    pub session_store: SessionStoreKind,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("ADDR").unwrap_or_else(|| "0.0.0.0:4000".to_string());
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://snippetbox.db".to_string());
        let static_dir = PathBuf::from(lookup("STATIC_DIR").unwrap_or_else(|| "./ui/static".to_string()));

        let lifetime_hours = lookup("SESSION_LIFETIME_HOURS")
            .and_then(|h| h.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(12);

        let session_store = match lookup("SESSION_STORE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "memory" => SessionStoreKind::Memory,
            _ => SessionStoreKind::Sqlite,
        };

        Self {
            addr,
            database_url,
            static_dir,
            session_lifetime: Duration::hours(lifetime_hours),
            session_store,
        }
    }
}

/// Applies `--addr=` and `--dsn=` flags on top of the environment
pub fn apply_cli_override(config: Config) -> Config {
    apply_args(config, env::args().skip(1))
}

fn apply_args<I>(mut config: Config, args: I) -> Config
where
    I: IntoIterator<Item = String>,
{
    for arg in args {
        if let Some(addr) = arg.strip_prefix("--addr=") {
            println!("🔧 CLI override: ADDR = {}", addr);
            config.addr = addr.to_string();
        } else if let Some(dsn) = arg.strip_prefix("--dsn=") {
            println!("🔧 CLI override: DATABASE_URL = {}", dsn);
            config.database_url = dsn.to_string();
        }
    }

    config
}
