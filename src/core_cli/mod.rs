use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "rouilleftpd", about = "A passive-mode FTP server written in Rust.")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind the control listener on
    #[arg(long)]
    pub host: Option<String>,

    /// Control port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory served to clients
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}
