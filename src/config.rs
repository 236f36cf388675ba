use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/sqlite.db?mode=rwc";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub omdb_api_key: String,
    pub omdb_base_url: String,
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub http_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5002);
        let omdb_api_key =
            env::var("API_KEY").map_err(|_| anyhow::anyhow!("API_KEY is not set"))?;
        let omdb_base_url = env::var("OMDB_BASE_URL")
            .unwrap_or_else(|_| "https://www.omdbapi.com/".to_string());
        let gemini_api_key = env::var("API_KEY_GEMINI")
            .map_err(|_| anyhow::anyhow!("API_KEY_GEMINI is not set"))?;
        let gemini_base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());
        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(30);
        Ok(Self {
            port,
            database_url,
            host,
            omdb_api_key,
            omdb_base_url,
            gemini_api_key,
            gemini_base_url,
            gemini_model,
            http_timeout_secs,
        })
    }
}
