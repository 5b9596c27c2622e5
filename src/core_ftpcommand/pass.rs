use crate::core_ftpcommand::error::{CommandError, CommandResult};
use crate::core_reply::Reply;
use crate::session::{AuthState, Session};
use log::{info, warn};

/// Handles the PASS FTP command.
///
/// Only valid once USER has named an account. A wrong password keeps the
/// username so the client may retry PASS.
pub async fn handle_pass_command(session: &mut Session, password: String) -> CommandResult {
    let username = match session.username() {
        Some(username) => username.to_string(),
        None => return Err(CommandError::BadSequence("Login with USER first.")),
    };

    match session.config.users.get(&username) {
        Some(record) if record.password == password => {
            info!("User {} logged in ({:?})", username, record.permission);
            session.auth = AuthState::Authenticated {
                permission: record.permission,
                username,
            };
            Ok(Reply::new(230, "User logged in, proceed."))
        }
        _ => {
            warn!("Login incorrect for user {}", username);
            session.auth = AuthState::AwaitingPassword { username };
            Ok(Reply::new(530, "Login incorrect."))
        }
    }
}
