use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealplanner_mealplan::DEFAULT_RECENT_PLANS;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// How many plans the dashboard lists, newest first
    #[serde(default = "default_recent_plans_limit")]
    pub recent_plans_limit: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            recent_plans_limit: default_recent_plans_limit(),
        }
    }
}

fn default_recent_plans_limit() -> usize {
    DEFAULT_RECENT_PLANS
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALPLANNER__PLANNER__RECENT_PLANS_LIMIT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("planner.recent_plans_limit", DEFAULT_RECENT_PLANS as u64)?
            .set_default("observability.log_level", default_log_level())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALPLANNER")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.planner.recent_plans_limit == 0 {
            return Err("Planner recent_plans_limit must be at least 1".to_string());
        }
        if self.observability.log_level.trim().is_empty() {
            return Err("Observability log_level must not be empty".to_string());
        }
        Ok(())
    }
}
