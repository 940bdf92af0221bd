// Entry point for a single pipeline run

use anyhow::{Context, Result};
use comment_pipeline::kernel::PipelineDeps;
use comment_pipeline::pipeline::{PipelineRunner, RunContext, RunnerConfig};
use comment_pipeline::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,comment_pipeline=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting fashion comment pipeline");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        comments_api_url = %config.comments_api_url,
        sentiment_model = %config.sentiment_model,
        "Configuration loaded"
    );

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    if config.run_migrations {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Migrations complete");
    }

    let deps = PipelineDeps::from_config(&config, pool.clone())
        .context("Failed to build pipeline dependencies")?;
    let ctx = RunContext::new(deps).with_fetch_limit(config.fetch_limit);
    let runner = PipelineRunner::new(RunnerConfig::from_config(&config));

    let report = runner.run(&ctx).await.context("Pipeline run failed")?;

    tracing::info!(
        run_id = %report.run_id,
        fetched = report.fetched(),
        persisted = report.persisted(),
        analyzed = report.analyzed(),
        "Pipeline finished"
    );

    pool.close().await;
    Ok(())
}
