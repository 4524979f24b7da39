use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scripttape::controllers::episode::EpisodeController;
use scripttape::domain::pipeline::PipelineService;
use scripttape::infrastructure::config::{Config, LogFormat};
use scripttape::infrastructure::http::start_http_server;
use scripttape::infrastructure::repositories::{PollySynthesisRepository, S3StorageRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting ScriptTape on {}:{}", config.host, config.port);

    // Create AWS clients
    tracing::info!("Initializing AWS clients with region: {}", config.aws_region);

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;

    tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

    let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
    let s3_client = Arc::new(aws_sdk_s3::Client::new(&aws_config));
    tracing::info!("AWS Polly and S3 clients initialized");

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject AWS clients)
    tracing::info!("Instantiating repositories...");
    let synthesis_repo = Arc::new(PollySynthesisRepository::new(
        polly_client,
        &config.output_format,
    ));
    let storage_repo = Arc::new(S3StorageRepository::new(s3_client));

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let pipeline_service = Arc::new(PipelineService::new(
        synthesis_repo,
        storage_repo,
        config.pipeline(),
    ));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let episode_controller = Arc::new(EpisodeController::new(pipeline_service));

    // Start HTTP server with all routes
    start_http_server(config, episode_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "scripttape=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "scripttape=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
