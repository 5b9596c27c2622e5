// src/core_ftpcommand/pwd.rs
use crate::core_ftpcommand::error::CommandResult;
use crate::core_reply::Reply;
use crate::session::Session;

pub async fn handle_pwd_command(session: &mut Session, _arg: String) -> CommandResult {
    Ok(Reply::new(
        257,
        format!("\"{}\" is current directory", session.current_dir),
    ))
}
