use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Command to execute to retrieve the API key; takes precedence over `api_key_env`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_command: Option<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        CompletionConfig {
            api_url: default_api_url(),
            model: default_model(),
            timeout_seconds: default_timeout(),
            api_key_env: default_api_key_env(),
            api_key_command: None,
        }
    }
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default)]
    pub unknown_subject: UnknownSubjectPolicy,
}

/// What to do with a subject label that matches no persona
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownSubjectPolicy {
    /// Fail the request as a client error
    #[default]
    Reject,
    /// Answer with the generic explain persona
    Explain,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<Vec<String>, Vec<String>> {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            errors.push(format!(
                "Server bind address is not a valid socket address: {}",
                self.server.bind_addr
            ));
        }

        match url::Url::parse(&self.completion.api_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                if url.scheme() == "http" {
                    warnings.push("Completion API URL uses plain http".to_string());
                }
            }
            Ok(url) => errors.push(format!(
                "Completion API URL must be http or https, got scheme '{}'",
                url.scheme()
            )),
            Err(e) => errors.push(format!("Completion API URL is invalid: {}", e)),
        }

        if self.completion.model.trim().is_empty() {
            errors.push("Completion model is required".to_string());
        }
        if self.completion.timeout_seconds == 0 {
            errors.push("Completion timeout must be greater than zero".to_string());
        }
        if self.completion.api_key_command.is_none() && self.completion.api_key_env.trim().is_empty() {
            errors.push("Either api_key_command or api_key_env must be set".to_string());
        }

        if self.routing.unknown_subject == UnknownSubjectPolicy::Explain {
            warnings.push("Unknown subjects will be answered by the generic tutor".to_string());
        }

        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(errors)
        }
    }
}
