// Here's the list of the FTP commands implemented
pub mod cwd;
pub mod dele;
pub mod handlers;
pub mod list;
pub mod mkd;
pub mod pass;
pub mod pwd;
pub mod quit;
pub mod retr;
pub mod rmd;
pub mod rnfr;
pub mod rnto;
pub mod stor;
pub mod type_;
pub mod user;

// The command table, errors and common helpers are here
pub mod error;
pub mod ftpcommand;
pub mod utils;
