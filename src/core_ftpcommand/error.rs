// Errors raised while handling one command; each maps to exactly one reply
use crate::core_reply::Reply;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Bad sequence of commands: {0}")]
    BadSequence(&'static str),

    #[error("No data connection: {0}")]
    NoDataConnection(&'static str),

    #[error("Cannot open passive listener")]
    PassiveUnavailable,

    #[error("Requested action not taken: {0}")]
    Failed(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CommandResult = Result<Reply, CommandError>;

impl CommandError {
    pub fn to_reply(&self) -> Reply {
        match self {
            CommandError::NotLoggedIn => Reply::new(530, "Please login with USER and PASS."),
            CommandError::PermissionDenied => Reply::new(550, "Permission denied."),
            CommandError::BadSequence(text) => Reply::new(503, *text),
            CommandError::NoDataConnection(text) => Reply::new(425, *text),
            CommandError::PassiveUnavailable => Reply::new(421, "Cannot open passive listener."),
            CommandError::Failed(text) => Reply::new(550, *text),
            CommandError::Io(_) => Reply::new(550, "Requested action not taken: operation failed."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_codes() {
        assert_eq!(CommandError::NotLoggedIn.to_reply().code, 530);
        assert_eq!(CommandError::PermissionDenied.to_reply().code, 550);
        assert_eq!(CommandError::BadSequence("x").to_reply().code, 503);
        assert_eq!(CommandError::NoDataConnection("x").to_reply().code, 425);
        assert_eq!(CommandError::PassiveUnavailable.to_reply().code, 421);
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(CommandError::from(io).to_reply().code, 550);
    }

    #[test]
    fn test_permission_text_is_recognisable() {
        let text = CommandError::PermissionDenied.to_reply().text.to_lowercase();
        assert!(text.contains("permission"));
    }
}
