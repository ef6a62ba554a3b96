//! Server startup utilities.

use shelf_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
       _          _  __
   ___| |__   ___| |/ _|
  / __| '_ \ / _ \ | |_
  \__ \ | | |  __/ |  _|
  |___/_| |_|\___|_|_|
    "#);
}

/// Prints where the server can be reached.
pub fn print_startup_info(config: &AppConfig) {
    let addr = config.server.addr();
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!("Static:    http://{}/static", addr);
    info!("Cache:     {:?}", config.cache.backend);
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info(&AppConfig::default());
    }
}
