use crate::core_ftpcommand::error::{CommandError, CommandResult};
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_reply::Reply;
use crate::session::Session;
use log::{error, info};
use tokio::fs;

/// Handles the MKD (Make Directory) FTP command.
///
/// Creating a directory that already exists is not an error.
pub async fn handle_mkd_command(session: &mut Session, arg: String) -> CommandResult {
    let dir_path = resolve_path(session.root(), &session.current_dir, &arg).await;
    info!("Received MKD command, constructed path: {:?}", dir_path);

    match fs::create_dir_all(&dir_path).await {
        Ok(_) => Ok(Reply::new(257, format!("\"{}\" directory created.", arg))),
        Err(e) => {
            error!("Failed to create directory: {:?}, error: {}", dir_path, e);
            Err(CommandError::Failed("Create directory failed."))
        }
    }
}
