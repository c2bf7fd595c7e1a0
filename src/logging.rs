use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GIFTGENIX_LOG";

fn default_filter(component: &str) -> String {
    if component == "giftgenix" {
        return "info,giftgenix=debug".to_string();
    }
    format!("info,giftgenix=debug,{component}=debug")
}

/// Builds the filter from `GIFTGENIX_LOG`, then `RUST_LOG`, then the default.
pub fn build_filter(component: &str) -> EnvFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter(component)))
}

/// Installs the global fmt subscriber. Safe to call more than once.
pub fn init_tracing(component: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(component))
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
