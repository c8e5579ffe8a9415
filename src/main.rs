use anyhow::Context;
use carousel_sync::core::navigation::resolve_navigation;
use carousel_sync::core::ConfigProvider;
use carousel_sync::utils::{logger, validation::Validate};
use carousel_sync::{Carousel, CliConfig, HttpApi, MutationOutcome, TomlConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?,
        ),
        None => None,
    };

    let json_logs = cli.json_logs
        || file_config
            .as_ref()
            .and_then(|c| c.log_format())
            .is_some_and(|format| format == "json");
    if json_logs {
        logger::init_json_logger(file_config.as_ref().and_then(|c| c.log_level()));
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting carousel-sync");

    let config: &dyn ConfigProvider = match &file_config {
        Some(file) => file,
        None => &cli,
    };

    let validation = match &file_config {
        Some(file) => file.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let api = HttpApi::from_config(config).context("Failed to build HTTP client")?;
    let mut carousel = Carousel::from_config(api.clone(), api, config);

    let outcome = carousel
        .load()
        .await
        .context("Carousel was disposed before content arrived")?;
    tracing::info!(
        "📥 Loaded {} items from {:?} source",
        outcome.items.len(),
        outcome.source
    );

    let report = carousel
        .spawn_reconcile()
        .await
        .context("Reconciliation task panicked")?;
    tracing::info!(
        "🔄 Reconciled {} items ({} failed)",
        report.patched,
        report.failed
    );

    for position in &cli.toggle {
        match carousel.toggle_like_at(*position).await {
            MutationOutcome::Committed(state) => tracing::info!(
                "❤️ Position {}: liked={} count={}",
                position,
                state.liked,
                state.like_count
            ),
            MutationOutcome::Failed { reason } => {
                tracing::warn!("⚠️ Position {} unchanged: {}", position, reason)
            }
        }
    }

    for item in carousel.items().await {
        let route = resolve_navigation(&item).route().unwrap_or_default();
        println!("{}\t{}", serde_json::to_string(&item)?, route);
    }

    carousel.dispose().await;
    Ok(())
}
