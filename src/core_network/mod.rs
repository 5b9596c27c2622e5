pub mod control;
pub mod network;
pub mod pasv;
pub mod transfer;

pub use control::ControlChannel;
pub use pasv::PasvAddress;
