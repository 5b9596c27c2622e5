//! Client side of the engine: the session a front end drives, and the
//! structured directory entries it hands back.

pub mod client;
pub mod entry;

pub use client::FtpClient;
pub use entry::{parse_listing, EntryKind, RemoteEntry};
