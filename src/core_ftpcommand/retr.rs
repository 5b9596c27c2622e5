use crate::core_ftpcommand::error::{CommandError, CommandResult};
use crate::core_ftpcommand::utils::resolve_path;
use crate::core_network::pasv::accept_data_connection;
use crate::core_network::transfer::pump;
use crate::core_reply::Reply;
use crate::session::Session;
use log::{error, info, warn};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// Handles the RETR (Retrieve) FTP command.
///
/// This function sends the contents of a file over the pending passive data
/// connection. The file must exist before the data connection is accepted.
///
/// # Arguments
///
/// * `session` - The session owned by this connection.
/// * `arg` - The name of the file to retrieve.
///
/// # Returns
///
/// The completion reply, or the error to report on the control channel.
pub async fn handle_retr_command(session: &mut Session, arg: String) -> CommandResult {
    let file_path = resolve_path(session.root(), &session.current_dir, &arg).await;
    if !fs::metadata(&file_path).await.map_or(false, |m| m.is_file()) {
        warn!("RETR of missing file: {:?}", file_path);
        return Err(CommandError::Failed("File not found."));
    }

    let mut data_stream = accept_data_connection(session).await?;

    session
        .control
        .send_reply(&Reply::new(150, "Opening binary mode data connection."))
        .await?;

    let sent = async {
        let mut file = File::open(&file_path).await?;
        let sent = pump(&mut file, &mut data_stream).await?;
        data_stream.shutdown().await?;
        Ok::<u64, std::io::Error>(sent)
    }
    .await;
    drop(data_stream);

    match sent {
        Ok(sent) => {
            info!("Sent {} bytes from {:?}", sent, file_path);
            Ok(Reply::new(226, "Transfer complete."))
        }
        Err(e) => {
            error!("Error transferring {:?}: {}", file_path, e);
            Err(CommandError::Failed("Failed to read file."))
        }
    }
}
