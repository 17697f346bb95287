use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use tracing::{info, warn};

use crate::{log_system_event, log_validation};

/// Complete application configuration loaded from environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub remote: RemoteConfig,
    pub logging: LoggingConfig,
}

/// Remote content-generation endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Initial bearer token for the credential store
    pub token: Option<String>,
}

/// Logging system configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_enabled: bool,
    pub console_enabled: bool,
    pub log_directory: String,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults
    ///
    /// Runs before the subscriber exists, so it does not log. Call
    /// [`Config::log_configuration_summary`] once logging is set up.
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            remote: RemoteConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Log a summary of loaded configuration (without sensitive data)
    pub fn log_configuration_summary(&self) {
        log_system_event!(config, "Configuration loaded from environment variables");
        info!(
            api_url = %self.remote.base_url,
            timeout_secs = self.remote.timeout_secs,
            token_masked = ?self.remote.token.as_deref().map(mask_sensitive_data),
            log_level = %self.logging.level,
            "Configuration summary"
        );
    }

    pub fn validate(&self) -> Result<()> {
        if !self.remote.base_url.starts_with("http://") && !self.remote.base_url.starts_with("https://") {
            return Err(anyhow!("STUDY_AID_API_URL must start with 'http://' or 'https://'"));
        }

        if self.remote.timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be greater than 0"));
        }

        let base_level = self.logging.level.split(',').next().unwrap_or_default().to_lowercase();
        if !["trace", "debug", "info", "warn", "error"].contains(&base_level.as_str()) {
            warn!("Invalid log level '{}', using 'info' as fallback", self.logging.level);
        }

        log_validation!(success, "configuration", "Configuration validation completed successfully");
        Ok(())
    }
}

impl RemoteConfig {
    fn from_env() -> Result<Self> {
        let base_url = env::var("STUDY_AID_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

        let timeout_str = env::var("STUDY_AID_TIMEOUT_SECS").unwrap_or_else(|_| "30".to_string());
        let timeout_secs = timeout_str
            .parse::<u64>()
            .map_err(|_| anyhow!("Invalid STUDY_AID_TIMEOUT_SECS value: '{}'. Must be a whole number of seconds", timeout_str))?;

        let token = env::var("STUDY_AID_TOKEN").ok().filter(|t| !t.trim().is_empty());

        Ok(RemoteConfig {
            base_url,
            timeout_secs,
            token,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl LoggingConfig {
    fn from_env() -> Result<Self> {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info,study_aid=debug".to_string());

        let file_enabled = env::var("LOG_FILE_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .unwrap_or(true);

        let console_enabled = env::var("LOG_CONSOLE_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .unwrap_or(true);

        let log_directory = env::var("LOG_DIRECTORY").unwrap_or_else(|_| "logs".to_string());

        Ok(LoggingConfig {
            level,
            file_enabled,
            console_enabled,
            log_directory,
        })
    }
}

/// Mask sensitive data in configuration for safe logging
pub fn mask_sensitive_data(data: &str) -> String {
    let chars: Vec<char> = data.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    fn sample_config() -> Config {
        Config {
            remote: RemoteConfig {
                base_url: "http://localhost:5000".to_string(),
                timeout_secs: 30,
                token: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_enabled: true,
                console_enabled: true,
                log_directory: "logs".to_string(),
            },
        }
    }

    #[test]
    fn test_mask_sensitive_data() {
        assert_eq!(mask_sensitive_data("short"), "*****");
        assert_eq!(mask_sensitive_data("eyJhbGciOiJIUzI1NiJ9"), "eyJh***NiJ9");
    }

    #[test]
    fn test_config_validation() {
        let config = sample_config();
        assert!(config.validate().is_ok());

        let mut invalid = config.clone();
        invalid.remote.base_url = "localhost:5000".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = config.clone();
        invalid.remote.timeout_secs = 0;
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_unknown_log_level_only_warns() {
        let mut config = sample_config();
        config.logging.level = "chatty".to_string();
        assert!(config.validate().is_ok());
    }

    /// Collects every event's message and fields as one line of text
    #[derive(Clone, Default)]
    struct CapturedEvents(Arc<Mutex<Vec<String>>>);

    struct LineVisitor<'a>(&'a mut String);

    impl Visit for LineVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.0.push_str(&format!("{}={:?} ", field.name(), value));
        }
    }

    impl<S: Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut line = String::new();
            event.record(&mut LineVisitor(&mut line));
            self.0.lock().unwrap().push(line);
        }
    }

    #[test]
    fn test_configuration_summary_is_logged_with_masked_token() {
        let mut config = sample_config();
        config.remote.token = Some("eyJhbGciOiJIUzI1NiJ9".to_string());

        let captured = CapturedEvents::default();
        let subscriber = tracing_subscriber::registry().with(captured.clone());
        tracing::subscriber::with_default(subscriber, || config.log_configuration_summary());

        let events = captured.0.lock().unwrap();
        let summary = events
            .iter()
            .find(|line| line.contains("Configuration summary"))
            .expect("summary event should be recorded");
        assert!(summary.contains("eyJh***NiJ9"));
        assert!(summary.contains("http://localhost:5000"));
        assert!(events.iter().all(|line| !line.contains("eyJhbGciOiJIUzI1NiJ9")));
    }

    #[test]
    fn test_timeout_duration() {
        assert_eq!(sample_config().remote.timeout(), Duration::from_secs(30));
    }
}
