use crate::core_ftpcommand::error::{CommandError, CommandResult};
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_reply::Reply;
use crate::session::Session;
use log::{error, info};
use tokio::fs;

pub async fn handle_dele_command(session: &mut Session, arg: String) -> CommandResult {
    let file_path = resolve_path(session.root(), &session.current_dir, &arg).await;

    match fs::remove_file(&file_path).await {
        Ok(_) => {
            info!("File deleted: {:?}", file_path);
            Ok(Reply::new(250, "Delete operation successful."))
        }
        Err(e) => {
            error!("Failed to delete file: {:?}, error: {}", file_path, e);
            Err(CommandError::Failed("Delete failed."))
        }
    }
}
