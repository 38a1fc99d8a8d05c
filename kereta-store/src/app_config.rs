use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub assistant: AssistantConfig,
    pub orders: OrdersConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AssistantConfig {
    pub api_base_url: String,
    pub model: String,
    /// Chat is disabled when no key is configured
    pub api_key: Option<String>,
    pub max_tool_rounds: usize,
    pub request_timeout_seconds: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-flash-latest".to_string(),
            api_key: None,
            max_tool_rounds: 8,
            request_timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OrdersConfig {
    pub seed_demo_order: bool,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self { seed_demo_order: true }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `KERETA__SERVER__PORT=9000` would set `server.port`
            .add_source(
                config::Environment::with_prefix("KERETA")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?;

        let mut config: Config = s.try_deserialize()?;
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            config.assistant.api_key = Some(key);
        }
        config.assistant.api_key = config.assistant.api_key.filter(|k| !k.trim().is_empty());

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_partial_file_keeps_defaults() {
        let s = config::Config::builder()
            .add_source(File::from_str(
                r#"
                [server]
                port = 9000

                [assistant]
                max_tool_rounds = 3
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: Config = s.try_deserialize().unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.assistant.max_tool_rounds, 3);
        assert_eq!(config.assistant.model, "gemini-flash-latest");
        assert!(config.assistant.api_key.is_none());
        assert!(config.orders.seed_demo_order);
        assert_eq!(config.cors.allowed_origins.len(), 2);
    }
}
