use anyhow::Result;
use neuroscan::{config::Config, server};
use tracing::{info, warn};

fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

/// Warns about every upstream service that will reject requests for lack of a key.
fn report_credentials(config: &Config) {
    let keys = [
        ("chat", config.llm.api_key.is_empty()),
        ("image classification", config.classifier.api_token.is_empty()),
        ("doctor search", config.search.api_key.is_empty()),
        (
            "geocoding",
            config.geocoding.api_key.as_deref().unwrap_or_default().is_empty(),
        ),
    ];

    for (service, missing) in keys {
        if missing {
            warn!("No API key configured for {}; those requests will fail", service);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = match neuroscan::config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());
    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .json()
        .init();

    info!(
        classifier = %config.classifier.model,
        chat_model = %config.llm.model,
        upload_dir = %config.server.upload_dir,
        session_ttl_secs = config.server.session_ttl_secs,
        "Starting neuroscan"
    );
    report_credentials(&config);

    server::run(config).await?;

    Ok(())
}
