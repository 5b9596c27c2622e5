//! Control-connection codec shared by the client and the server.

pub mod command;
pub mod encoding;
pub mod reply;

pub use command::{encode_command, parse_command_line};
pub use encoding::TextEncoding;
pub use reply::{read_reply, Reply};
