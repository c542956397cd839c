mod types;

pub use types::*;

use crate::error::{Result, TutorError};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the XDG-compliant config directory
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "tutor-router")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| TutorError::Config("Could not determine config directory".to_string()))
}

/// Get the config file path
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Resolve the config path, preferring an explicit override
pub fn resolve_config_path(override_path: Option<&Path>) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path.to_path_buf()),
        None => config_path(),
    }
}

/// Load config, falling back to defaults when the default file does not exist.
/// An explicitly requested file must exist.
pub fn load_config(override_path: Option<&Path>) -> Result<Config> {
    match override_path {
        Some(path) => load_config_from(path),
        None => {
            let path = config_path()?;
            if path.exists() {
                load_config_from(&path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Load config from a specific path
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(TutorError::ConfigNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Save config to a specific path
pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Resolve the completion API key from the configured command or environment variable
pub fn resolve_api_key(config: &CompletionConfig) -> Result<String> {
    if let Some(ref command) = config.api_key_command {
        return run_api_key_command(command);
    }

    match std::env::var(&config.api_key_env) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        Ok(_) => Err(TutorError::ApiKey(format!(
            "Environment variable {} is empty",
            config.api_key_env
        ))),
        Err(_) => Err(TutorError::ApiKey(format!(
            "Environment variable {} is not set",
            config.api_key_env
        ))),
    }
}

/// Execute the API key command and return its trimmed stdout
fn run_api_key_command(command: &str) -> Result<String> {
    let output = if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", command]).output()
    } else {
        Command::new("sh").args(["-c", command]).output()
    };

    match output {
        Ok(output) => {
            if output.status.success() {
                let key = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if key.is_empty() {
                    Err(TutorError::ApiKey("API key command returned empty output".to_string()))
                } else {
                    Ok(key)
                }
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(TutorError::ApiKey(format!(
                    "API key command failed: {}",
                    stderr.trim()
                )))
            }
        }
        Err(e) => Err(TutorError::ApiKey(format!(
            "Failed to execute API key command: {}",
            e
        ))),
    }
}

/// Redact sensitive information from config for display
pub fn redact_config(config: &Config) -> Config {
    let mut redacted = config.clone();
    if redacted.completion.api_key_command.is_some() {
        redacted.completion.api_key_command = Some("[REDACTED]".to_string());
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[completion]
model = "gpt-4o"

[routing]
unknown_subject = "explain"
"#,
        )
        .unwrap();

        assert_eq!(config.completion.model, "gpt-4o");
        assert_eq!(config.completion.timeout_seconds, 60);
        assert_eq!(config.completion.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.server.bind_addr, "127.0.0.1:8000");
        assert_eq!(config.routing.unknown_subject, UnknownSubjectPolicy::Explain);
        assert_eq!(config.settings.log_format, LogFormat::Text);
    }

    #[test]
    fn test_default_config_is_valid() {
        let warnings = Config::default().validate().unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_validation_collects_errors() {
        let mut config = Config::default();
        config.server.bind_addr = "localhost".to_string();
        config.completion.api_url = "ftp://example.com".to_string();
        config.completion.model = " ".to_string();
        config.completion.timeout_seconds = 0;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_save_and_load_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.completion.model = "gpt-4o".to_string();
        save_config_to(&config, &path).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.completion.model, "gpt-4o");
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            load_config(Some(&path)),
            Err(TutorError::ConfigNotFound(_))
        ));
    }

    #[test]
    fn test_redact_hides_key_command() {
        let mut config = Config::default();
        config.completion.api_key_command = Some("pass show openai".to_string());
        let redacted = redact_config(&config);
        assert_eq!(redacted.completion.api_key_command.as_deref(), Some("[REDACTED]"));
    }

    #[cfg(unix)]
    #[test]
    fn test_api_key_from_command() {
        let config = CompletionConfig {
            api_key_command: Some("echo '  sk-test  '".to_string()),
            ..CompletionConfig::default()
        };
        assert_eq!(resolve_api_key(&config).unwrap(), "sk-test");
    }

    #[test]
    fn test_api_key_missing_env() {
        let config = CompletionConfig {
            api_key_env: "TUTOR_ROUTER_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..CompletionConfig::default()
        };
        assert!(matches!(resolve_api_key(&config), Err(TutorError::ApiKey(_))));
    }
}
