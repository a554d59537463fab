use anyhow::Result;
use config::{Config, File};
use serde::{Deserialize, Serialize};
use accesstrial_shared::config::{ApiConfig, ObservabilityConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightApiConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub reference_file: Option<String>,
    /// Seconds between reference file reloads; 0 disables reloading.
    #[serde(default = "default_reload_interval")]
    pub reload_interval_secs: u64,
}

fn default_reload_interval() -> u64 {
    60
}

impl Default for InsightApiConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            observability: ObservabilityConfig::default(),
            reference_file: None,
            reload_interval_secs: default_reload_interval(),
        }
    }
}

pub fn load_config(path: &str) -> Result<InsightApiConfig> {
    let config = Config::builder()
        .add_source(File::with_name(path))
        .add_source(config::Environment::with_prefix("INSIGHT_API").separator("__"))
        .build()?;

    Ok(config.try_deserialize()?)
}
