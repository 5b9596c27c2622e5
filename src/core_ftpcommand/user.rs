use crate::core_ftpcommand::error::CommandResult;
use crate::core_reply::Reply;
use crate::session::{AuthState, Session};
use log::{info, warn};

/// Handles the USER FTP command.
///
/// A known username moves the session to awaiting its password; an unknown
/// one leaves it unauthenticated. Either way any earlier login is dropped.
///
/// # Arguments
///
/// * `session` - The session owned by this connection.
/// * `username` - The username provided by the client.
pub async fn handle_user_command(session: &mut Session, username: String) -> CommandResult {
    info!("Received USER command with username: {}", username);

    if session.config.users.contains_key(&username) {
        session.auth = AuthState::AwaitingPassword { username };
        Ok(Reply::new(331, "User name okay, need password."))
    } else {
        warn!("Unknown username: {}", username);
        session.auth = AuthState::Unauthenticated;
        Ok(Reply::new(530, "User not found."))
    }
}
