use std::path::PathBuf;

use clap::Parser;

/// Fitroom virtual try-on service
#[derive(Debug, Parser)]
#[command(name = "fitroom", about = "Virtual try-on service backed by Gemini image models")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "fitroom.toml", env = "FITROOM_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "FITROOM_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
