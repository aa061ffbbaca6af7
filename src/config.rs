use std::net::SocketAddr;

use anyhow::Context;

/// Runtime settings, read from the process environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub cors_origins: Vec<String>,
    pub uploads_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data.db?mode=rwc".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4201)),
            max_connections: 5,
            cors_origins: vec!["http://localhost:3000".to_string()],
            uploads_dir: "uploads".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(addr) => addr
                .parse()
                .with_context(|| format!("invalid BIND_ADDR: {addr}"))?,
            Err(_) => defaults.bind_addr,
        };

        let max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(n) => n
                .parse()
                .with_context(|| format!("invalid DB_MAX_CONNECTIONS: {n}"))?,
            Err(_) => defaults.max_connections,
        };

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|origins| parse_origins(&origins))
            .unwrap_or(defaults.cors_origins);

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr,
            max_connections,
            cors_origins,
            uploads_dir: std::env::var("UPLOADS_DIR").unwrap_or(defaults.uploads_dir),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
