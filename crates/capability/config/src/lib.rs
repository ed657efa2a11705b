//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub advisor_api_key: Option<String>,
    pub advisor_endpoint: String,
    pub environment_feed_url: String,
    pub seed_enabled: bool,
    pub seed_consumption_days: u64,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr = env::var("AQUA_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let advisor_api_key = read_optional("AQUA_ADVISOR_API_KEY");
        let advisor_endpoint = env::var("AQUA_ADVISOR_ENDPOINT").unwrap_or_else(|_| {
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
                .to_string()
        });
        let environment_feed_url = env::var("AQUA_ENVIRONMENT_FEED_URL").unwrap_or_else(|_| {
            "https://api.thingspeak.com/channels/1538410/feeds.json?results=10".to_string()
        });
        let seed_enabled = read_bool_with_default("AQUA_SEED", true);
        let seed_consumption_days = read_u64_with_default("AQUA_SEED_CONSUMPTION_DAYS", 60)?;

        Ok(Self {
            http_addr,
            advisor_api_key,
            advisor_endpoint,
            environment_feed_url,
            seed_enabled,
            seed_consumption_days,
        })
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
