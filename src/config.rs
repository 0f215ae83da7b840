use crate::error::{Error, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com";

/// Configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    pub api_base_url: String,
    pub access_token: String,
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    let api_base_url =
        std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    let access_token = std::env::var("ACCESS_TOKEN")
        .map_err(|_| Error::Config("ACCESS_TOKEN is not set".to_string()))?;
    Ok(Config {
        api_base_url,
        access_token,
    })
}
