use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

#[derive(Parser, Debug, Clone)]
#[command(name = "bakery-orders", about = "Bakery branch ordering service", version)]
pub struct Config {
    #[arg(
        long,
        env = "BAKERY_BIND",
        value_name = "ADDR",
        default_value = DEFAULT_BIND,
        help = "Address the HTTP server listens on"
    )]
    pub bind: SocketAddr,

    #[arg(
        long,
        env = "BAKERY_CATALOG",
        value_name = "FILE",
        help = "JSON file with categories, branches and products to seed at startup"
    )]
    pub catalog: Option<PathBuf>,

    #[arg(
        long,
        env = "BAKERY_CHANNEL_CAPACITY",
        value_name = "N",
        default_value_t = DEFAULT_CHANNEL_CAPACITY,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..),
        help = "Mailbox size of each resource actor"
    )]
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            catalog: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Config {
    /// Logs the effective settings once tracing is up.
    pub fn log_summary(&self) {
        info!(bind = %self.bind, channel_capacity = self.channel_capacity, "Configuration loaded");
        match &self.catalog {
            Some(path) => info!(catalog = %path.display(), "Catalog seed file configured"),
            None => info!("BAKERY_CATALOG not set, starting with an empty catalog"),
        }
    }
}
