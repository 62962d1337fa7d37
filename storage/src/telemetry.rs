use crate::config::Config;
use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "info,attachments_storage=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter());

    let result = if config.is_local() {
        // Local development: Pretty printing
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    } else {
        // Deployed: one JSON object per line for the log collector
        registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .try_init()
    };

    result.context("failed to install tracing subscriber")
}
