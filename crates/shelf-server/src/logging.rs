//! Tracing subscriber setup.

use shelf_config::ObservabilityConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the filter: `RUST_LOG` when set, else the configured level for
/// the shelf crates with quieter dependencies.
#[must_use]
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.log_level;
        EnvFilter::new(format!(
            "warn,shelf_server={level},shelf_rest={level},shelf_service={level},\
             shelf_repository={level},shelf_security={level},shelf_config={level},\
             http={level},tower_http={level}"
        ))
    })
}

/// Installs the global subscriber. Pretty output unless `log_format` is
/// `json`.
pub fn init_logging(config: &ObservabilityConfig) {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    if config.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}
