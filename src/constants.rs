// src/constants.rs

/// Size of every chunk moved over a data connection.
pub const TRANSFER_CHUNK_SIZE: usize = 4096;

pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: u16 = 2121;
pub const DEFAULT_ROOT_DIR: &str = "./ftp_root";

pub const BANNER_TEXT: &str = "rouilleftp server ready.";
