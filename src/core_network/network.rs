use crate::config::Config;
use crate::constants::BANNER_TEXT;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::handlers::{dispatch, initialize_command_handlers};
use crate::core_network::ControlChannel;
use crate::core_reply::{parse_command_line, Reply};
use crate::session::Session;
use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;
use tokio::net::TcpStream;

/// Serves one control connection until QUIT or until the client goes away.
///
/// Command failures are answered with a reply and never end the session;
/// only I/O errors on the control socket do.
pub async fn handle_connection(socket: TcpStream, config: Arc<Config>) -> Result<()> {
    let control = ControlChannel::new(socket).context("Failed to set up control channel")?;
    let peer = control.peer_addr();
    let mut session = Session::new(control, config);

    session
        .control
        .send_reply(&Reply::new(220, BANNER_TEXT))
        .await
        .context("Failed to send banner")?;

    let handlers = initialize_command_handlers();

    loop {
        let line = match session.control.read_line().await? {
            Some(line) => line,
            None => {
                info!("Client {} disconnected", peer);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let (verb, arg) = parse_command_line(&line);
        if verb == "PASS" {
            debug!("Received command from {}: PASS ****", peer);
        } else {
            debug!("Received command from {}: {}", peer, line);
        }

        let reply = match FtpCommand::from_str(&verb) {
            Some(command) => dispatch(&handlers, command, &mut session, arg).await,
            None => Reply::new(502, "Command not implemented."),
        };
        session.control.send_reply(&reply).await?;

        if verb == "QUIT" {
            break;
        }
    }

    session.control.shutdown().await.ok();
    Ok(())
}
