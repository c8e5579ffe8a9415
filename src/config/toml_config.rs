use crate::config::{DEFAULT_AGGREGATION_PATH, DEFAULT_RECONCILE_CONCURRENCY};
use crate::core::ConfigProvider;
use crate::utils::error::{CarouselError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub reconcile: Option<ReconcileConfig>,
    pub shuffle: Option<ShuffleConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub aggregation_path: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CarouselError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CarouselError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.source.base_url)?;
        validation::validate_endpoint_path("source.aggregation_path", self.aggregation_path())?;

        if let Some(concurrency) = self.reconcile.as_ref().and_then(|r| r.concurrency) {
            validation::validate_positive_number("reconcile.concurrency", concurrency, 1)?;
        }

        if let Some(token) = &self.source.auth_token {
            validation::validate_non_empty_string("source.auth_token", token)?;
            if token.contains("${") {
                return Err(CarouselError::InvalidConfigValueError {
                    field: "source.auth_token".to_string(),
                    value: token.clone(),
                    reason: "Environment variable is not set".to_string(),
                });
            }
        }

        if let Some(format) = self.log_format() {
            if !["compact", "json"].contains(&format) {
                return Err(CarouselError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn log_format(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.format.as_deref())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.source.base_url
    }

    fn aggregation_path(&self) -> &str {
        self.source
            .aggregation_path
            .as_deref()
            .unwrap_or(DEFAULT_AGGREGATION_PATH)
    }

    fn auth_token(&self) -> Option<&str> {
        self.source.auth_token.as_deref()
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    fn reconcile_concurrency(&self) -> usize {
        self.reconcile
            .as_ref()
            .and_then(|r| r.concurrency)
            .unwrap_or(DEFAULT_RECONCILE_CONCURRENCY)
    }

    fn shuffle_seed(&self) -> Option<u64> {
        self.shuffle.as_ref().and_then(|s| s.seed)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
