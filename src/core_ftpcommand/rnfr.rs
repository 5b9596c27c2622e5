use crate::core_ftpcommand::error::{CommandError, CommandResult};
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_reply::Reply;
use crate::session::Session;
use log::{debug, warn};
use tokio::fs;

/// Handles the RNFR (Rename From) FTP command.
///
/// Records the source of a two-phase rename. The pending source is only set
/// when the path exists; otherwise any earlier pending source is cleared too.
///
/// # Arguments
///
/// * `session` - The session owned by this connection.
/// * `arg` - The current name of the file or directory.
pub async fn handle_rnfr_command(session: &mut Session, arg: String) -> CommandResult {
    let path = resolve_path(session.root(), &session.current_dir, &arg).await;

    if fs::metadata(&path).await.is_err() {
        warn!("RNFR of missing path: {:?}", path);
        session.rename_from = None;
        return Err(CommandError::Failed("File not found."));
    }

    debug!("Pending rename from {:?}", path);
    session.rename_from = Some(path);
    Ok(Reply::new(350, "File exists, ready for destination name."))
}
