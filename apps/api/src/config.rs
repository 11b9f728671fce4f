use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if the generation service credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Enables voice answers. Without it the transcription endpoint reports a service error.
    pub google_speech_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| non_blank(lookup(key));

        Ok(Config {
            anthropic_api_key: get("ANTHROPIC_API_KEY")
                .context("Required environment variable 'ANTHROPIC_API_KEY' is not set")?,
            google_speech_api_key: get("GOOGLE_SPEECH_API_KEY"),
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
