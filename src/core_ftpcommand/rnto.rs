use crate::core_ftpcommand::error::{CommandError, CommandResult};
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_reply::Reply;
use crate::session::Session;
use log::{error, info};
use tokio::fs;

/// Handles the RNTO (Rename To) FTP command.
///
/// Completes the rename started by RNFR. The pending source is consumed by
/// every RNTO, whether the rename succeeds or not.
pub async fn handle_rnto_command(session: &mut Session, arg: String) -> CommandResult {
    let old_path = session
        .rename_from
        .take()
        .ok_or(CommandError::BadSequence("Bad sequence of commands."))?;

    let new_path = resolve_path(session.root(), &session.current_dir, &arg).await;
    if new_path == session.root() {
        return Err(CommandError::Failed("Rename failed."));
    }

    match fs::rename(&old_path, &new_path).await {
        Ok(_) => {
            info!("Renamed {:?} to {:?}", old_path, new_path);
            Ok(Reply::new(250, "Rename successful."))
        }
        Err(e) => {
            error!("Failed to rename {:?} to {:?}: {}", old_path, new_path, e);
            Err(CommandError::Failed("Rename failed."))
        }
    }
}
