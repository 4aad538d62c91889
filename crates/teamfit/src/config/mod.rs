use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::forms::DEFAULT_FALLBACK_MAX_RANK;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub forms: FormConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let definition_path = env::var("TEAMFIT_FORM_DEFINITION")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let fallback_max_rank = match env::var("TEAMFIT_FALLBACK_MAX_RANK") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidFallbackMaxRank { value: raw })?,
            Err(_) => DEFAULT_FALLBACK_MAX_RANK,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            forms: FormConfig {
                definition_path,
                fallback_max_rank,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where form metadata comes from and how unknown ranking groups are sized.
#[derive(Debug, Clone)]
pub struct FormConfig {
    pub definition_path: Option<PathBuf>,
    pub fallback_max_rank: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFallbackMaxRank { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFallbackMaxRank { value } => write!(
                f,
                "TEAMFIT_FALLBACK_MAX_RANK must be a positive integer (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("TEAMFIT_FORM_DEFINITION");
        env::remove_var("TEAMFIT_FALLBACK_MAX_RANK");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.forms.definition_path.is_none());
        assert_eq!(config.forms.fallback_max_rank, 4);
    }

    #[test]
    fn reads_form_settings_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("TEAMFIT_FORM_DEFINITION", "forms/team.csv");
        env::set_var("TEAMFIT_FALLBACK_MAX_RANK", "6");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(
            config.forms.definition_path,
            Some(PathBuf::from("forms/team.csv"))
        );
        assert_eq!(config.forms.fallback_max_rank, 6);
        reset_env();
    }

    #[test]
    fn rejects_zero_fallback_max_rank() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("TEAMFIT_FALLBACK_MAX_RANK", "0");
        let err = AppConfig::load().expect_err("zero is rejected");
        assert!(matches!(err, ConfigError::InvalidFallbackMaxRank { .. }));
        reset_env();
    }
}
