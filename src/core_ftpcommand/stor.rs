use crate::core_ftpcommand::error::{CommandError, CommandResult};
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_network::pasv::accept_data_connection;
use crate::core_network::transfer::pump;
use crate::core_reply::Reply;
use crate::session::Session;
use log::{error, info, warn};
use tokio::fs::{self, File};

/// Handles the STOR (Store File) FTP command.
///
/// This function stores a file uploaded by the client under the session's
/// current directory, creating missing parent directories inside the root.
/// Write permission has already been checked by the dispatcher.
///
/// # Arguments
///
/// * `session` - The session owned by this connection.
/// * `arg` - The name of the file to be stored.
///
/// # Returns
///
/// The completion reply, or the error to report on the control channel.
pub async fn handle_stor_command(session: &mut Session, arg: String) -> CommandResult {
    if arg.trim().is_empty() {
        warn!("STOR command received with no arguments");
        return Err(CommandError::Failed("No file name given."));
    }

    let file_path = resolve_path(session.root(), &session.current_dir, &arg).await;
    let is_dir = fs::metadata(&file_path).await.map_or(false, |m| m.is_dir());
    if file_path == session.root() || is_dir {
        return Err(CommandError::Failed("Cannot store over a directory."));
    }
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut data_stream = accept_data_connection(session).await?;

    session
        .control
        .send_reply(&Reply::new(
            150,
            "Opening binary mode data connection for file upload.",
        ))
        .await?;

    let received = async {
        let mut file = File::create(&file_path).await?;
        let received = pump(&mut data_stream, &mut file).await?;
        file.sync_all().await?;
        Ok::<u64, std::io::Error>(received)
    }
    .await;
    drop(data_stream);

    match received {
        Ok(received) => {
            info!("File stored successfully: {:?} ({} bytes)", file_path, received);
            Ok(Reply::new(226, "Transfer complete."))
        }
        Err(e) => {
            error!("Error storing {:?}: {}", file_path, e);
            Err(CommandError::Failed("Failed to store file."))
        }
    }
}
