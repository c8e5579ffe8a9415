use crate::config::{DEFAULT_AGGREGATION_PATH, DEFAULT_RECONCILE_CONCURRENCY};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "carousel-sync")]
#[command(about = "Fetch carousel content and keep like state in sync")]
pub struct CliConfig {
    /// Path to a TOML configuration file; replaces the source flags below
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "http://localhost:8080")]
    pub api_base_url: String,

    #[arg(long, default_value = DEFAULT_AGGREGATION_PATH)]
    pub aggregation_path: String,

    #[arg(long)]
    pub auth_token: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_RECONCILE_CONCURRENCY)]
    pub reconcile_concurrency: usize,

    /// Seed for a reproducible display order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Display positions to toggle after reconciliation
    #[arg(long, value_delimiter = ',')]
    pub toggle: Vec<usize>,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn aggregation_path(&self) -> &str {
        &self.aggregation_path
    }

    fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn reconcile_concurrency(&self) -> usize {
        self.reconcile_concurrency
    }

    fn shuffle_seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_endpoint_path("aggregation_path", &self.aggregation_path)?;
        validation::validate_positive_number(
            "reconcile_concurrency",
            self.reconcile_concurrency,
            1,
        )?;
        if let Some(token) = &self.auth_token {
            validation::validate_non_empty_string("auth_token", token)?;
        }
        Ok(())
    }
}
