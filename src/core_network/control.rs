use crate::core_reply::{encode_command, read_reply, Reply, TextEncoding};
use crate::error::FtpResult;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// One control connection: the socket plus a line-buffered reader over it.
///
/// Owned by exactly one session; dropping it closes the socket.
#[derive(Debug)]
pub struct ControlChannel {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    encoding: TextEncoding,
    local_addr: SocketAddr,
    peer_addr: SocketAddr,
}

impl ControlChannel {
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        let local_addr = stream.local_addr()?;
        let peer_addr = stream.peer_addr()?;
        let (reader, writer) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(reader),
            writer,
            encoding: TextEncoding::default(),
            local_addr,
            peer_addr,
        })
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn set_encoding(&mut self, encoding: TextEncoding) {
        self.encoding = encoding;
    }

    /// Address of the interface this connection arrived on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Reads one CRLF-terminated line; `None` once the peer has closed.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buffer = Vec::new();
        let n = self.reader.read_until(b'\n', &mut buffer).await?;
        if n == 0 {
            return Ok(None);
        }
        while matches!(buffer.last(), Some(b'\n' | b'\r')) {
            buffer.pop();
        }
        Ok(Some(self.encoding.decode(&buffer)))
    }

    pub async fn read_reply(&mut self) -> FtpResult<Reply> {
        read_reply(&mut self.reader, self.encoding).await
    }

    pub async fn send_command(&mut self, command: &str, arg: Option<&str>) -> io::Result<()> {
        let line = encode_command(command, arg);
        self.writer.write_all(&self.encoding.encode(&line)).await
    }

    pub async fn send_reply(&mut self, reply: &Reply) -> io::Result<()> {
        self.writer
            .write_all(&self.encoding.encode(&reply.encode()))
            .await
    }

    pub async fn shutdown(&mut self) -> io::Result<()> {
        self.writer.shutdown().await
    }
}
