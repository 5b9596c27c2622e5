use crate::core_ftpcommand::error::{CommandError, CommandResult};
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_reply::Reply;
use crate::session::Session;
use log::{error, info, warn};
use tokio::fs;

/// Handles the RMD (Remove Directory) FTP command.
///
/// Only empty directories are removed, and never the root itself.
pub async fn handle_rmd_command(session: &mut Session, arg: String) -> CommandResult {
    let dir_path = resolve_path(session.root(), &session.current_dir, &arg).await;
    if dir_path == session.root() {
        warn!("Refusing to remove the root directory");
        return Err(CommandError::Failed("Remove directory failed."));
    }

    match fs::remove_dir(&dir_path).await {
        Ok(_) => {
            info!("Directory removed: {:?}", dir_path);
            Ok(Reply::new(250, "Remove directory operation successful."))
        }
        Err(e) => {
            error!("Failed to remove directory: {:?}, error: {}", dir_path, e);
            Err(CommandError::Failed("Remove directory failed."))
        }
    }
}
