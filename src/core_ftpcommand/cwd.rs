use crate::core_ftpcommand::error::{CommandError, CommandResult};
use crate::core_ftpcommand::utils::{resolve_path, virtual_from_real};
use crate::core_reply::Reply;
use crate::session::Session;
use log::debug;
use tokio::fs;

pub async fn handle_cwd_command(session: &mut Session, arg: String) -> CommandResult {
    let arg = if arg.is_empty() { String::from("/") } else { arg };
    let dir_path = resolve_path(session.root(), &session.current_dir, &arg).await;

    if !fs::metadata(&dir_path).await.map_or(false, |m| m.is_dir()) {
        return Err(CommandError::Failed("Failed to change directory."));
    }
    session.current_dir = virtual_from_real(session.root(), &dir_path);
    debug!("Working directory is now {}", session.current_dir);
    Ok(Reply::new(250, "Directory successfully changed."))
}
