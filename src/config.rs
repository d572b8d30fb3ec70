use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Upstream credential. Missing is allowed at startup; generation fails with 500.
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub debug_env_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            groq_api_key: None,
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            data_dir: PathBuf::from("data"),
            public_dir: PathBuf::from("public"),
            debug_env_enabled: true,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            groq_api_key: std::env::var("GROQ_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            groq_base_url: std::env::var("GROQ_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("GROQ_BASE_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            groq_model: std::env::var("GROQ_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            data_dir: std::env::var("DATA_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            public_dir: std::env::var("PUBLIC_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            debug_env_enabled: debug_env_flag(std::env::var("DEBUG_ENV_ENABLED").ok())?,
        };

        // Never log the key itself
        match config.groq_api_key {
            Some(ref key) => tracing::info!("Groq API key found and loaded ({} chars)", key.len()),
            None => tracing::warn!("GROQ_API_KEY is missing from environment"),
        }
        tracing::debug!("Groq Base URL: {}", config.groq_base_url);
        tracing::debug!("Groq Model: {}", config.groq_model);
        tracing::debug!("Data directory: {}", config.data_dir.display());
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    pub fn leads_file(&self) -> PathBuf {
        self.data_dir.join("leads.json")
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }
}

/// On unless explicitly switched off; a blank value counts as unset.
fn debug_env_flag(raw: Option<String>) -> anyhow::Result<bool> {
    match raw.filter(|s| !s.trim().is_empty()) {
        Some(value) => parse_bool(&value).ok_or_else(|| {
            anyhow::anyhow!("DEBUG_ENV_ENABLED must be true/false, 1/0 or yes/no")
        }),
        None => Ok(true),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
