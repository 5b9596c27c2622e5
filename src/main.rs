mod core_cli;

use crate::core_cli::Cli;
use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::*;
use env_logger::{Builder, Env};
use log::info;
use rouilleftp::{server, Config};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize the logger with a custom format and colors
    let default_level = if args.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let level = match record.level() {
                log::Level::Error => record.level().to_string().red(),
                log::Level::Warn => record.level().to_string().yellow(),
                log::Level::Info => record.level().to_string().green(),
                log::Level::Debug => record.level().to_string().blue(),
                log::Level::Trace => record.level().to_string().white(),
            };
            writeln!(buf, "[{}] [{}] {}", timestamp, level, record.args())
        })
        .init();

    // Load configuration from the TOML file, or run on defaults
    let mut config = match &args.config {
        Some(path) => {
            let path = path.to_string_lossy();
            info!("Loading configuration from {}", path);
            Config::load_from_file(&path)?
        }
        None => Config::default(),
    };

    // Command-line flags win over the file
    if let Some(host) = args.host {
        config.server.bind_host = host;
    }
    if let Some(port) = args.port {
        config.server.listen_port = port;
    }
    if let Some(root) = args.root {
        config.server.root_dir = root;
    }

    server::run(config).await.context("FTP server stopped")
}
