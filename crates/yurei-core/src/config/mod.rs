mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::YureiError;
use defaults::*;

pub const ENV_LINE_CHANNEL_SECRET: &str = "LINE_CHANNEL_SECRET";
pub const ENV_LINE_CHANNEL_ACCESS_TOKEN: &str = "LINE_CHANNEL_ACCESS_TOKEN";
pub const ENV_AZURE_OPENAI_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_AZURE_OPENAI_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_AZURE_OPENAI_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_AZURE_OPENAI_MODEL: &str = "AZURE_OPENAI_MODEL";

/// Top-level Yurei configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub line: LineConfig,
    #[serde(default)]
    pub azure_openai: AzureOpenAiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub broadcast: BroadcastConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
        }
    }
}

/// LINE Messaging API credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineConfig {
    #[serde(default)]
    pub channel_secret: String,
    #[serde(default)]
    pub channel_access_token: String,
    #[serde(default = "default_line_api_base")]
    pub api_base: String,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            channel_secret: String::new(),
            channel_access_token: String::new(),
            api_base: default_line_api_base(),
        }
    }
}

/// Azure OpenAI chat-completions deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureOpenAiConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_version: String,
    /// Deployment / model identifier.
    #[serde(default)]
    pub model: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_azure_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AzureOpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            api_version: String::new(),
            model: String::new(),
            timeout_secs: default_azure_timeout_secs(),
        }
    }
}

/// Webhook HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

/// Periodic push message to a single recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_broadcast_interval_hours")]
    pub interval_hours: u64,
    /// LINE user id that receives the broadcast.
    #[serde(default = "default_broadcast_recipient")]
    pub recipient: String,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_hours: default_broadcast_interval_hours(),
            recipient: default_broadcast_recipient(),
        }
    }
}

impl Config {
    /// Overwrite credentials with values from `lookup` (normally the process
    /// environment). Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_LINE_CHANNEL_SECRET) {
            self.line.channel_secret = v;
        }
        if let Some(v) = get(ENV_LINE_CHANNEL_ACCESS_TOKEN) {
            self.line.channel_access_token = v;
        }
        if let Some(v) = get(ENV_AZURE_OPENAI_ENDPOINT) {
            self.azure_openai.endpoint = v;
        }
        if let Some(v) = get(ENV_AZURE_OPENAI_API_KEY) {
            self.azure_openai.api_key = v;
        }
        if let Some(v) = get(ENV_AZURE_OPENAI_API_VERSION) {
            self.azure_openai.api_version = v;
        }
        if let Some(v) = get(ENV_AZURE_OPENAI_MODEL) {
            self.azure_openai.model = v;
        }
    }

    /// Names of required values that are still empty, in declaration order.
    pub fn missing(&self) -> Vec<&'static str> {
        let required = [
            (ENV_LINE_CHANNEL_SECRET, &self.line.channel_secret),
            (ENV_LINE_CHANNEL_ACCESS_TOKEN, &self.line.channel_access_token),
            (ENV_AZURE_OPENAI_ENDPOINT, &self.azure_openai.endpoint),
            (ENV_AZURE_OPENAI_API_KEY, &self.azure_openai.api_key),
            (ENV_AZURE_OPENAI_API_VERSION, &self.azure_openai.api_version),
            (ENV_AZURE_OPENAI_MODEL, &self.azure_openai.model),
        ];
        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Fail unless every credential is present.
    pub fn validate(&self) -> Result<(), YureiError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(YureiError::ConfigurationMissing(missing.join(", ")))
        }
    }
}

/// Parse configuration from a TOML string.
pub fn from_toml(content: &str) -> Result<Config, YureiError> {
    toml::from_str(content).map_err(|e| YureiError::Config(format!("failed to parse config: {e}")))
}

/// Load configuration from a TOML file and the process environment.
///
/// Falls back to defaults if the file does not exist. Does not validate;
/// callers that need credentials call [`Config::validate`].
pub fn load(path: &str) -> Result<Config, YureiError> {
    let path = Path::new(path);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| YureiError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        from_toml(&content)?
    } else {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Config::default()
    };

    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}
