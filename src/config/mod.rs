#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_AGGREGATION_PATH: &str = "/carousel";
pub const DEFAULT_RECONCILE_CONCURRENCY: usize = 1;
