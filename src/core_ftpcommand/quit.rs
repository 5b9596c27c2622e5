use crate::core_ftpcommand::error::CommandResult;
use crate::core_reply::Reply;
use crate::session::Session;
use log::info;

/// Handles the QUIT FTP command.
///
/// Only produces the goodbye reply; the connection loop closes the control
/// channel once it has been sent.
pub async fn handle_quit_command(session: &mut Session, _arg: String) -> CommandResult {
    info!("Received QUIT command from {}", session.control.peer_addr());
    session.pasv_listener = None;
    Ok(Reply::new(221, "Goodbye."))
}
