mod api;
mod config;
mod service;

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use accesstrial_shared::ReferenceData;
use crate::config::InsightApiConfig;
use crate::service::InsightService;

#[derive(Parser, Debug)]
#[command(name = "insight-api")]
#[command(about = "AccessTrial insight API: overview metrics, classifiers and page datasets")]
struct Args {
    #[arg(short, long, default_value = "config/insight-api.yaml")]
    config: String,

    /// Overrides `reference_file` from the config file
    #[arg(short, long)]
    reference: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so its log level applies; problems are logged below
    let (mut config, config_error) = if Path::new(&args.config).exists() {
        match config::load_config(&args.config) {
            Ok(config) => (config, None),
            Err(e) => (InsightApiConfig::default(), Some(e.to_string())),
        }
    } else {
        (
            InsightApiConfig::default(),
            Some(format!("{} not found", args.config)),
        )
    };

    let level = &config.observability.log_level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("insight_api={level},accesstrial_shared={level},tower_http=debug").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(reason) = config_error {
        warn!("Using default configuration: {}", reason);
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if args.reference.is_some() {
        config.reference_file = args.reference.clone();
    }

    let reference = match &config.reference_file {
        Some(path) => ReferenceData::load(path)?,
        None => {
            info!("Using built-in reference data");
            ReferenceData::builtin()
        }
    };

    let service = Arc::new(InsightService::new(
        reference,
        config.observability.metrics_enabled,
    ));

    if let Some(path) = config.reference_file.clone() {
        if config.reload_interval_secs > 0 {
            let service_clone = service.clone();
            let interval = Duration::from_secs(config.reload_interval_secs);
            tokio::spawn(async move {
                reference_reload_loop(service_clone, path, interval).await;
            });
        }
    }

    let addr = config.api.bind_address();
    info!("Starting insight-api on {}", addr);
    api::start_server(service, &addr).await?;

    Ok(())
}

// Reload the reference file periodically; a bad file keeps the current tables.
async fn reference_reload_loop(service: Arc<InsightService>, path: String, interval: Duration) {
    loop {
        tokio::time::sleep(interval).await;

        match ReferenceData::load(&path) {
            Ok(reference) if *service.reference() == reference => {
                debug!("Reference data unchanged");
            }
            Ok(reference) => {
                info!("Reloading reference data from {}", path);
                service.replace_reference(reference);
            }
            Err(e) => {
                warn!("Failed to reload reference data: {}", e);
            }
        }
    }
}
