use std::path::PathBuf;

use clap::Parser;

/// turbo-demo: drive a Turbo navigation session against a web app.
#[derive(Parser, Debug)]
#[command(name = "turbo-demo", version, about)]
pub struct Args {
    /// Config file path override (otherwise `$TURBO_CONFIG`, then the platform config dir).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Start location override.
    #[arg(short = 'l', long)]
    pub location: Option<String>,

    /// Open a native window with a real web view.
    #[cfg(feature = "window")]
    #[arg(long)]
    pub window: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
