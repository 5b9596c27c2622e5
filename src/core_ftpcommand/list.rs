use crate::core_ftpcommand::error::CommandResult;
use crate::core_ftpcommand::utils::{format_list_line, resolve_path};
use crate::core_network::pasv::accept_data_connection;
use crate::core_reply::Reply;
use crate::session::Session;
use log::{error, info};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Handles the LIST FTP command.
///
/// Lists the argument path, or the current directory when none is given,
/// over the pending passive data connection. A directory that cannot be read
/// is sent as an empty listing.
pub async fn handle_list_command(session: &mut Session, arg: String) -> CommandResult {
    let mut data_stream = accept_data_connection(session).await?;

    session
        .control
        .send_reply(&Reply::new(150, "Here comes the directory listing."))
        .await?;

    let target = if arg.is_empty() {
        session.current_dir.clone()
    } else {
        arg
    };
    let dir_path = resolve_path(session.root(), &session.current_dir, &target).await;
    let listing = build_listing(&dir_path).await;

    data_stream.write_all(listing.as_bytes()).await?;
    data_stream.shutdown().await?;
    drop(data_stream);

    info!("Directory listing sent for {:?}", dir_path);
    Ok(Reply::new(226, "Directory send OK."))
}

async fn build_listing(dir_path: &Path) -> String {
    let mut listing = String::new();
    let mut entries = match fs::read_dir(dir_path).await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to read directory {:?}: {}", dir_path, e);
            return listing;
        }
    };

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read entry in {:?}: {}", dir_path, e);
                break;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        let line = match fs::metadata(entry.path()).await {
            Ok(metadata) => format_list_line(&name, metadata.is_dir(), metadata.len()),
            Err(e) => {
                error!("Failed to stat {:?}: {}", entry.path(), e);
                format_list_line(&name, false, 0)
            }
        };
        listing.push_str(&line);
    }
    listing
}
