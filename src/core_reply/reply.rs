//! Reply parsing and serialization (RFC 959 §4.2).
//!
//! Multi-line replies look like:
//! ```text
//! 220-Welcome
//! 220-second line
//! 220 Ready
//! ```
//! Only the code and the text of the final line are kept.

use crate::core_reply::TextEncoding;
use crate::error::{FtpError, FtpResult};
use log::trace;
use std::fmt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub code: u16,
    pub text: String,
    pub is_multiline: bool,
}

impl Reply {
    pub fn new(code: u16, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
            is_multiline: false,
        }
    }

    pub fn encode(&self) -> String {
        format!("{} {}\r\n", self.code, self.text)
    }

    pub fn is_one_of(&self, codes: &[u16]) -> bool {
        codes.contains(&self.code)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.text)
    }
}

/// How a status line ends after its three digits.
#[derive(Debug, PartialEq, Eq)]
enum Continuation {
    Final,
    More,
}

/// Validates the three-digit prefix of a status line.
fn parse_status_line(line: &str) -> FtpResult<(u16, Continuation, &str)> {
    let bytes = line.as_bytes();
    if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
        return Err(FtpError::MalformedReply(line.to_string()));
    }
    if !(b'1'..=b'5').contains(&bytes[0]) {
        return Err(FtpError::MalformedReply(line.to_string()));
    }
    let code = line[..3]
        .parse::<u16>()
        .map_err(|_| FtpError::MalformedReply(line.to_string()))?;

    match bytes.get(3) {
        None => Ok((code, Continuation::Final, "")),
        Some(b' ') => Ok((code, Continuation::Final, &line[4..])),
        Some(b'-') => Ok((code, Continuation::More, &line[4..])),
        Some(_) => Err(FtpError::MalformedReply(line.to_string())),
    }
}

async fn read_reply_line<R>(reader: &mut R, encoding: TextEncoding) -> FtpResult<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut buffer = Vec::new();
    let n = reader.read_until(b'\n', &mut buffer).await?;
    if n == 0 {
        return Err(FtpError::ConnectionClosed);
    }
    while matches!(buffer.last(), Some(b'\n' | b'\r')) {
        buffer.pop();
    }
    Ok(encoding.decode(&buffer))
}

/// Reads exactly one reply, consuming every line of a multi-line reply.
pub async fn read_reply<R>(reader: &mut R, encoding: TextEncoding) -> FtpResult<Reply>
where
    R: AsyncBufRead + Unpin,
{
    let first = read_reply_line(reader, encoding).await?;
    let (code, continuation, text) = parse_status_line(&first)?;

    let reply = match continuation {
        Continuation::Final => Reply::new(code, text),
        Continuation::More => {
            let terminator = format!("{} ", code);
            loop {
                let line = read_reply_line(reader, encoding).await?;
                if line.starts_with(&terminator) {
                    break Reply {
                        code,
                        text: line[terminator.len()..].to_string(),
                        is_multiline: true,
                    };
                }
            }
        }
    };

    trace!("<<< {}", reply);
    Ok(reply)
}
