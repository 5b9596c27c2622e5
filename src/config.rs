use crate::constants::{DEFAULT_BIND_HOST, DEFAULT_LISTEN_PORT, DEFAULT_ROOT_DIR};
use crate::users::{default_users, UserRecord};
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::net::Ipv4Addr;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_host: String,
    pub listen_port: u16,
    pub root_dir: PathBuf,
    pub pasv_address: Option<Ipv4Addr>, // Advertised in 227 replies when behind NAT
    pub max_sessions: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub users: HashMap<String, UserRecord>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: String::from(DEFAULT_BIND_HOST),
            listen_port: DEFAULT_LISTEN_PORT,
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            pasv_address: None,
            max_sessions: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            users: default_users(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(config_str)?;
        if config.users.is_empty() {
            config.users = default_users();
        }
        Ok(config)
    }

    /// Creates the root directory if needed and pins it to its canonical form.
    ///
    /// Must run before the listener starts: path containment compares against
    /// the canonical root.
    pub fn prepare(&mut self) -> Result<()> {
        let root = &self.server.root_dir;
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create root directory: {:?}", root))?;
        self.server.root_dir = root
            .canonicalize()
            .with_context(|| format!("Failed to resolve root directory: {:?}", root))?;
        Ok(())
    }
}

// Helper function to log configuration options
pub fn log_config(config: &Config) {
    info!("  Bind Host: {}", config.server.bind_host);
    info!("  Listen Port: {}", config.server.listen_port);
    info!("  Root Directory: {:?}", config.server.root_dir);
    match config.server.pasv_address {
        Some(addr) => info!("  PASV Address: {}", addr),
        None => info!("  PASV Address: <control interface>"),
    }
    match config.server.max_sessions {
        Some(max) => info!("  Max Sessions: {}", max),
        None => info!("  Max Sessions: unlimited"),
    }
    let mut names: Vec<&String> = config.users.keys().collect();
    names.sort();
    info!("  Users: {:?}", names);
}
