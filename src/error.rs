// Errors surfaced to callers of the protocol engine
use crate::core_reply::Reply;
use thiserror::Error;

/// Coarse classification of an [`FtpError`], so callers can message each case specifically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unexpected reply.
    Protocol,
    /// Socket closed, reset or unreachable.
    Connection,
    /// A write operation was refused for this account.
    Permission,
    /// Commands issued in the wrong order (503).
    Sequence,
}

#[derive(Error, Debug)]
pub enum FtpError {
    #[error("{context} failed: unexpected reply {reply}")]
    UnexpectedReply { context: &'static str, reply: Reply },

    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    #[error("Connection closed by server")]
    ConnectionClosed,

    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("{context} refused: {reply}")]
    PermissionDenied { context: &'static str, reply: Reply },

    #[error("{context} out of sequence: {reply}")]
    BadSequence { context: &'static str, reply: Reply },
}

pub type FtpResult<T> = Result<T, FtpError>;

impl FtpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FtpError::UnexpectedReply { .. } | FtpError::MalformedReply(_) => ErrorKind::Protocol,
            FtpError::ConnectionClosed | FtpError::Connection(_) => ErrorKind::Connection,
            FtpError::PermissionDenied { .. } => ErrorKind::Permission,
            FtpError::BadSequence { .. } => ErrorKind::Sequence,
        }
    }

    /// Classifies a reply that did not carry one of the accepted codes.
    ///
    /// `mutating` marks commands that change the remote filesystem; a 550 on
    /// those is reported as a permission failure when the server says so.
    pub fn from_reply(context: &'static str, reply: Reply, mutating: bool) -> Self {
        match reply.code {
            503 => FtpError::BadSequence { context, reply },
            550 if mutating && mentions_permission(&reply.text) => {
                FtpError::PermissionDenied { context, reply }
            }
            _ => FtpError::UnexpectedReply { context, reply },
        }
    }

    /// The reply that triggered this error, if any.
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            FtpError::UnexpectedReply { reply, .. }
            | FtpError::PermissionDenied { reply, .. }
            | FtpError::BadSequence { reply, .. } => Some(reply),
            _ => None,
        }
    }
}

fn mentions_permission(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("permission") || lower.contains("denied")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_error_from_503() {
        let err = FtpError::from_reply("RNTO", Reply::new(503, "Bad sequence of commands."), true);
        assert_eq!(err.kind(), ErrorKind::Sequence);
    }

    #[test]
    fn test_permission_only_for_mutating_commands() {
        let denied = Reply::new(550, "Permission denied.");
        assert_eq!(
            FtpError::from_reply("MKD", denied.clone(), true).kind(),
            ErrorKind::Permission
        );
        assert_eq!(
            FtpError::from_reply("RETR", denied, false).kind(),
            ErrorKind::Protocol
        );
    }

    #[test]
    fn test_plain_550_is_protocol() {
        let err = FtpError::from_reply("DELE", Reply::new(550, "Delete failed."), true);
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert_eq!(err.reply().map(|r| r.code), Some(550));
    }

    #[test]
    fn test_io_error_is_connection() {
        let err: FtpError =
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset").into();
        assert_eq!(err.kind(), ErrorKind::Connection);
        assert_eq!(FtpError::ConnectionClosed.kind(), ErrorKind::Connection);
    }
}
