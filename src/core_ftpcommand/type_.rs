use crate::core_ftpcommand::error::CommandResult;
use crate::core_reply::Reply;
use crate::session::Session;

/// Handles the TYPE FTP command.
///
/// The type is recorded but every transfer is binary.
pub async fn handle_type_command(session: &mut Session, arg: String) -> CommandResult {
    let type_ = arg.trim().to_uppercase();
    session.type_ = if type_.is_empty() { String::from("I") } else { type_ };
    Ok(Reply::new(200, format!("Type set to {}.", session.type_)))
}
