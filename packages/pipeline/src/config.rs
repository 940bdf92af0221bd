use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_COMMENTS_API_URL: &str = "https://jsonplaceholder.typicode.com/comments";
pub const DEFAULT_SENTIMENT_API_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Number of fetched records handed to the persist stage.
pub const DEFAULT_FETCH_LIMIT: usize = 10;

/// Pipeline configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub comments_api_url: String,
    pub fetch_limit: usize,
    pub sentiment_api_url: String,
    pub sentiment_model: String,
    pub hf_api_token: Option<String>,
    pub stage_max_retries: u32,
    pub stage_retry_delay: Duration,
    /// Applied to both HTTP clients only when `HTTP_TIMEOUT_SECS` is set
    pub http_timeout: Option<Duration>,
    pub run_migrations: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            comments_api_url: env::var("COMMENTS_API_URL")
                .unwrap_or_else(|_| DEFAULT_COMMENTS_API_URL.to_string()),
            fetch_limit: parse_or("FETCH_LIMIT", DEFAULT_FETCH_LIMIT)
                .context("FETCH_LIMIT must be a valid number")?,
            sentiment_api_url: env::var("SENTIMENT_API_URL")
                .unwrap_or_else(|_| DEFAULT_SENTIMENT_API_URL.to_string()),
            sentiment_model: env::var("SENTIMENT_MODEL")
                .unwrap_or_else(|_| DEFAULT_SENTIMENT_MODEL.to_string()),
            hf_api_token: env::var("HF_API_TOKEN").ok(),
            stage_max_retries: parse_or("STAGE_MAX_RETRIES", 1)
                .context("STAGE_MAX_RETRIES must be a valid number")?,
            stage_retry_delay: Duration::from_secs(
                parse_or("STAGE_RETRY_DELAY_SECS", 300)
                    .context("STAGE_RETRY_DELAY_SECS must be a valid number")?,
            ),
            http_timeout: parse_opt("HTTP_TIMEOUT_SECS")
                .context("HTTP_TIMEOUT_SECS must be a valid number")?
                .map(Duration::from_secs),
            run_migrations: parse_or("RUN_MIGRATIONS", false)
                .context("RUN_MIGRATIONS must be true or false")?,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(parse_opt(key)?.unwrap_or(default))
}

fn parse_opt<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        Err(_) => Ok(None),
    }
}
