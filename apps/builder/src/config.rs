use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default except the optional API key.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted document and sector tag.
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    /// Suggestions are disabled when unset.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: env_or("RESUME_DATA_DIR", ".resume-builder").into(),
            export_dir: env_or("EXPORT_DIR", "exports").into(),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
