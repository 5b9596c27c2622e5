use crate::core_ftpcommand::error::{CommandError, CommandResult};
use crate::core_reply::Reply;
use crate::error::{FtpError, FtpResult};
use crate::session::Session;
use log::{debug, error};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, SocketAddrV4};
use tokio::net::{TcpListener, TcpStream};

/// The `h1,h2,h3,h4,p1,p2` address carried by a 227 reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasvAddress {
    pub ip: Ipv4Addr,
    pub port: u16,
}

impl PasvAddress {
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self { ip, port }
    }

    pub fn from_sextuple(values: [u8; 6]) -> Self {
        let [h1, h2, h3, h4, p1, p2] = values;
        Self {
            ip: Ipv4Addr::new(h1, h2, h3, h4),
            port: u16::from(p1) * 256 + u16::from(p2),
        }
    }

    pub fn sextuple(&self) -> [u8; 6] {
        let [h1, h2, h3, h4] = self.ip.octets();
        let [p1, p2] = self.port.to_be_bytes();
        [h1, h2, h3, h4, p1, p2]
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.ip, self.port))
    }

    /// Extracts the address from 227 reply text such as
    /// `Entering Passive Mode (127,0,0,1,195,80).`
    pub fn parse_reply_text(text: &str) -> FtpResult<Self> {
        let malformed = || FtpError::MalformedReply(format!("Invalid PASV reply: {}", text));

        let start = text.find('(').ok_or_else(malformed)?;
        let end = text[start + 1..]
            .find(')')
            .map(|offset| start + 1 + offset)
            .ok_or_else(malformed)?;

        let tokens: Vec<&str> = text[start + 1..end].split(',').collect();
        if tokens.len() != 6 {
            return Err(malformed());
        }
        let mut values = [0u8; 6];
        for (value, token) in values.iter_mut().zip(tokens) {
            *value = token.trim().parse().map_err(|_| malformed())?;
        }
        Ok(Self::from_sextuple(values))
    }
}

impl fmt::Display for PasvAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [h1, h2, h3, h4, p1, p2] = self.sextuple();
        write!(f, "{},{},{},{},{},{}", h1, h2, h3, h4, p1, p2)
    }
}

/// Opens the client side of a data connection. Only called after a 227 reply.
pub async fn connect_data_channel(address: PasvAddress) -> FtpResult<TcpStream> {
    debug!("Opening data connection to {}", address.socket_addr());
    Ok(TcpStream::connect(address.socket_addr()).await?)
}

/// The IPv4 address to advertise for this session's passive listener.
fn advertised_ip(session: &Session, bound: IpAddr) -> Option<Ipv4Addr> {
    if let Some(addr) = session.config.server.pasv_address {
        return Some(addr);
    }
    match bound {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped(),
    }
}

/// Sets up a passive mode (PASV) listener and returns the 227 reply text.
///
/// Any listener left over from an earlier PASV is closed first. The new one
/// binds an ephemeral port on the interface the control connection arrived on.
pub async fn setup_pasv_listener(session: &mut Session) -> Result<String, CommandError> {
    session.pasv_listener = None;

    let interface = session.control.local_addr().ip();
    let listener = TcpListener::bind((interface, 0)).await.map_err(|e| {
        error!("PASV bind error on {}: {}", interface, e);
        CommandError::PassiveUnavailable
    })?;
    let addr = listener.local_addr()?;

    let ip = advertised_ip(session, addr.ip()).ok_or_else(|| {
        error!("PASV needs an IPv4 address, control interface is {}", interface);
        CommandError::PassiveUnavailable
    })?;
    let pasv = PasvAddress::new(ip, addr.port());
    debug!("PASV listener set up on {}, advertised as {}", addr, pasv);

    session.pasv_listener = Some(listener);
    Ok(format!("Entering Passive Mode ({}).", pasv))
}

/// Handles the PASV FTP command.
pub async fn handle_pasv_command(session: &mut Session, _arg: String) -> CommandResult {
    let text = setup_pasv_listener(session).await?;
    Ok(Reply::new(227, text))
}

/// Accepts the single data connection allowed by the pending PASV listener.
///
/// The listener is consumed whether or not the accept succeeds.
pub async fn accept_data_connection(session: &mut Session) -> Result<TcpStream, CommandError> {
    let listener = session
        .pasv_listener
        .take()
        .ok_or(CommandError::NoDataConnection("Use PASV first."))?;

    debug!("Waiting for data connection...");
    match listener.accept().await {
        Ok((stream, peer)) => {
            debug!("Accepted data connection from: {}", peer);
            Ok(stream)
        }
        Err(e) => {
            error!("Failed to accept data connection: {}", e);
            Err(CommandError::NoDataConnection("Can't open data connection."))
        }
    }
}
