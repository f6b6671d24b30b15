mod cli;
mod env_check;
mod scenario;
#[cfg(feature = "window")]
mod window;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use turbo_config::TurboConfig;

const DEFAULT_LOG_DIRECTIVE: &str = "turbo=info";

fn init_logging(directive: &str) {
    let filter = match directive.parse::<Directive>() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(e) => {
            eprintln!("invalid log directive {directive:?} ({e}), using {DEFAULT_LOG_DIRECTIVE}");
            EnvFilter::new(DEFAULT_LOG_DIRECTIVE)
        }
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(args: &cli::Args) -> (TurboConfig, Option<String>) {
    let loaded = match &args.config {
        Some(path) => turbo_config::load_config_from(path),
        None => turbo_config::load_config(),
    };
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (TurboConfig::default(), Some(e.to_string())),
    }
}

fn main() {
    let args = cli::parse();

    // Config is read before logging so its level can seed the filter.
    let (mut config, load_error) = load_config(&args);
    let directive = args
        .log_level
        .as_deref()
        .map(|level| format!("turbo={}", level.to_lowercase()))
        .unwrap_or_else(|| config.logging.directive());
    init_logging(&directive);

    tracing::info!("turbo-demo v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    if let Some(e) = load_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    if let Some(location) = args.location {
        config.session.start_location = location;
    }
    tracing::info!(
        start = %config.session.start_location,
        destinations = config.destinations.len(),
        "Config loaded"
    );

    env_check::check_start_location(&config.session.start_location);

    #[cfg(feature = "window")]
    if args.window {
        if let Err(e) = window::run(config) {
            tracing::error!("Window error: {e}");
        }
        tracing::info!("Shutdown complete");
        return;
    }

    if let Err(e) = scenario::run(&config) {
        tracing::error!("Scenario failed: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
