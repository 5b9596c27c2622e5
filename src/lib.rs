//! Passive-mode FTP engine: a client session and a server session speaking
//! a subset of RFC 959 over plain TCP.

pub mod config;
pub mod constants;
pub mod core_client;
pub mod core_ftpcommand;
pub mod core_network;
pub mod core_reply;
pub mod error;
pub mod server;
pub mod session;
pub mod users;

pub use config::{Config, ServerConfig};
pub use core_client::{EntryKind, FtpClient, RemoteEntry};
pub use core_reply::{Reply, TextEncoding};
pub use error::{ErrorKind, FtpError, FtpResult};
pub use server::FtpServer;
pub use users::{Permission, UserRecord};
