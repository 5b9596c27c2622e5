use crate::core_client::entry::{parse_listing, RemoteEntry};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_network::pasv::{connect_data_channel, PasvAddress};
use crate::core_network::transfer::pump;
use crate::core_network::ControlChannel;
use crate::core_reply::{Reply, TextEncoding};
use crate::error::{FtpError, FtpResult};
use log::{debug, info, warn};
use std::io;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

const OPENING_CODES: &[u16] = &[125, 150];
const COMPLETION_CODES: &[u16] = &[226, 250];

/// A logged-in (or about to be) FTP client session over one control connection.
///
/// Every method is one request/response sequence; nothing runs in the
/// background. To cancel an operation, drop its future: the sockets it owns
/// are closed with it.
#[derive(Debug)]
pub struct FtpClient {
    control: ControlChannel,
    host: String,
    port: u16,
}

impl FtpClient {
    /// Opens the control connection and reads the banner.
    ///
    /// `connect_timeout` bounds both the TCP connect and the wait for the
    /// banner. Anything other than a 220 banner is a protocol error.
    pub async fn connect(host: &str, port: u16, connect_timeout: Duration) -> FtpResult<Self> {
        let stream = timeout(connect_timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| timed_out(host, port))??;
        let mut control = ControlChannel::new(stream)?;

        let banner = timeout(connect_timeout, control.read_reply())
            .await
            .map_err(|_| timed_out(host, port))??;
        if banner.code != 220 {
            return Err(FtpError::from_reply("connect", banner, false));
        }
        info!("Connected to {}:{}: {}", host, port, banner.text);

        Ok(Self {
            control,
            host: host.to_string(),
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn encoding(&self) -> TextEncoding {
        self.control.encoding()
    }

    /// Sets the encoding used for control text and as the listing fallback.
    pub fn set_encoding(&mut self, encoding: TextEncoding) {
        self.control.set_encoding(encoding);
    }

    pub async fn login(&mut self, user: &str, password: &str) -> FtpResult<()> {
        let reply = self.send_command("USER", Some(user)).await?;
        match reply.code {
            230 => Ok(()),
            331 => {
                self.command("PASS", Some(password), &[230, 202]).await?;
                info!("Logged in as {}", user);
                Ok(())
            }
            _ => Err(FtpError::from_reply("USER", reply, false)),
        }
    }

    /// Returns the server's current directory.
    pub async fn pwd(&mut self) -> FtpResult<String> {
        let reply = self.command("PWD", None, &[257]).await?;
        Ok(quoted_path(&reply.text))
    }

    pub async fn cwd(&mut self, path: &str) -> FtpResult<()> {
        self.command("CWD", Some(path), &[250]).await.map(drop)
    }

    pub async fn mkd(&mut self, dir: &str) -> FtpResult<()> {
        self.command("MKD", Some(dir), &[257, 250]).await.map(drop)
    }

    pub async fn rmd(&mut self, dir: &str) -> FtpResult<()> {
        self.command("RMD", Some(dir), &[250]).await.map(drop)
    }

    pub async fn delete(&mut self, name: &str) -> FtpResult<()> {
        self.command("DELE", Some(name), &[250]).await.map(drop)
    }

    /// Two-phase rename. The server drops its pending source on any RNTO.
    pub async fn rename(&mut self, old: &str, new: &str) -> FtpResult<()> {
        self.command("RNFR", Some(old), &[350]).await?;
        self.command("RNTO", Some(new), &[250]).await.map(drop)
    }

    /// Lists the current directory as raw, non-empty lines.
    pub async fn list_lines(&mut self) -> FtpResult<Vec<String>> {
        let mut data = self.open_transfer("LIST", None).await?;
        let mut bytes = Vec::new();
        data.read_to_end(&mut bytes).await?;
        drop(data);
        self.finish_transfer("LIST").await?;

        let text = self.encoding().decode_listing(&bytes);
        Ok(text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Lists the current directory as structured entries.
    pub async fn list_entries(&mut self) -> FtpResult<Vec<RemoteEntry>> {
        let lines = self.list_lines().await?;
        Ok(parse_listing(lines))
    }

    /// Downloads `name` into `sink` and returns the number of bytes written.
    pub async fn retr_binary<W>(&mut self, name: &str, sink: &mut W) -> FtpResult<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut data = self.open_transfer("RETR", Some(name)).await?;
        let received = pump(&mut data, sink).await?;
        drop(data);
        self.finish_transfer("RETR").await?;
        debug!("Retrieved {} ({} bytes)", name, received);
        Ok(received)
    }

    /// Uploads everything `source` yields as `name` and returns the byte count.
    pub async fn stor_binary<R>(&mut self, name: &str, source: &mut R) -> FtpResult<u64>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let mut data = self.open_transfer("STOR", Some(name)).await?;
        let sent = pump(source, &mut data).await?;
        data.shutdown().await?;
        drop(data);
        self.finish_transfer("STOR").await?;
        debug!("Stored {} ({} bytes)", name, sent);
        Ok(sent)
    }

    /// Says goodbye and closes the control connection. Errors are ignored.
    pub async fn quit(mut self) {
        if let Err(e) = self.control.send_command("QUIT", None).await {
            debug!("QUIT not sent: {}", e);
        } else if let Err(e) = self.control.read_reply().await {
            debug!("No reply to QUIT: {}", e);
        }
        self.control.shutdown().await.ok();
    }

    async fn send_command(&mut self, command: &'static str, arg: Option<&str>) -> FtpResult<Reply> {
        if command == "PASS" {
            debug!("> PASS ****");
        } else {
            debug!("> {} {}", command, arg.unwrap_or(""));
        }
        self.control.send_command(command, arg).await?;
        let reply = self.control.read_reply().await?;
        debug!("< {}", reply);
        Ok(reply)
    }

    async fn command(
        &mut self,
        command: &'static str,
        arg: Option<&str>,
        accepted: &[u16],
    ) -> FtpResult<Reply> {
        let reply = self.send_command(command, arg).await?;
        expect(command, reply, accepted)
    }

    async fn open_data_channel(&mut self) -> FtpResult<TcpStream> {
        let reply = self.command("PASV", None, &[227]).await?;
        let address = PasvAddress::parse_reply_text(&reply.text)?;
        connect_data_channel(address).await
    }

    // TYPE I, PASV, connect, then the request itself up to its 125/150.
    async fn open_transfer(&mut self, command: &'static str, arg: Option<&str>) -> FtpResult<TcpStream> {
        self.command("TYPE", Some("I"), &[200]).await?;
        let data = self.open_data_channel().await?;
        self.command(command, arg, OPENING_CODES).await?;
        Ok(data)
    }

    async fn finish_transfer(&mut self, command: &'static str) -> FtpResult<()> {
        let reply = self.control.read_reply().await?;
        debug!("< {}", reply);
        expect(command, reply, COMPLETION_CODES).map(drop)
    }
}

fn expect(command: &'static str, reply: Reply, accepted: &[u16]) -> FtpResult<Reply> {
    if reply.is_one_of(accepted) {
        return Ok(reply);
    }
    let mutating = FtpCommand::from_str(command).map_or(false, FtpCommand::is_mutating);
    warn!("{} failed: {}", command, reply);
    Err(FtpError::from_reply(command, reply, mutating))
}

fn timed_out(host: &str, port: u16) -> FtpError {
    FtpError::Connection(io::Error::new(
        io::ErrorKind::TimedOut,
        format!("Timed out connecting to {}:{}", host, port),
    ))
}

/// Extracts the path between the first two double quotes, or the whole text.
fn quoted_path(text: &str) -> String {
    let mut parts = text.splitn(3, '"');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(path), Some(_)) => path.to_string(),
        _ => text.to_string(),
    }
}
