use crate::core_ftpcommand::error::{CommandError, CommandResult};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_reply::Reply;
use crate::session::Session;
use log::{error, warn};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

// Specific crate for the PASV command
use crate::core_network::pasv;

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = CommandResult> + Send + 'a>>;

type CommandHandler = for<'a> fn(&'a mut Session, String) -> HandlerFuture<'a>;

/// Session state a command requires before its handler may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Anyone,
    LoggedIn,
    Write,
}

impl Access {
    fn check(self, session: &Session) -> Result<(), CommandError> {
        match self {
            Access::Anyone => Ok(()),
            Access::LoggedIn if session.is_logged_in() => Ok(()),
            Access::Write => match session.permission() {
                Some(permission) if permission.can_write() => Ok(()),
                Some(_) => Err(CommandError::PermissionDenied),
                None => Err(CommandError::NotLoggedIn),
            },
            _ => Err(CommandError::NotLoggedIn),
        }
    }
}

pub struct CommandEntry {
    pub access: Access,
    handler: CommandHandler,
}

pub type CommandTable = HashMap<FtpCommand, CommandEntry>;

fn entry(access: Access, handler: CommandHandler) -> CommandEntry {
    CommandEntry { access, handler }
}

pub fn initialize_command_handlers() -> CommandTable {
    let mut handlers: CommandTable = HashMap::new();

    handlers.insert(
        FtpCommand::USER,
        entry(Access::Anyone, |session, arg| {
            Box::pin(crate::core_ftpcommand::user::handle_user_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::PASS,
        entry(Access::Anyone, |session, arg| {
            Box::pin(crate::core_ftpcommand::pass::handle_pass_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::QUIT,
        entry(Access::Anyone, |session, arg| {
            Box::pin(crate::core_ftpcommand::quit::handle_quit_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::PWD,
        entry(Access::LoggedIn, |session, arg| {
            Box::pin(crate::core_ftpcommand::pwd::handle_pwd_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::CWD,
        entry(Access::LoggedIn, |session, arg| {
            Box::pin(crate::core_ftpcommand::cwd::handle_cwd_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::TYPE,
        entry(Access::LoggedIn, |session, arg| {
            Box::pin(crate::core_ftpcommand::type_::handle_type_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::PASV,
        entry(Access::LoggedIn, |session, arg| {
            Box::pin(pasv::handle_pasv_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::LIST,
        entry(Access::LoggedIn, |session, arg| {
            Box::pin(crate::core_ftpcommand::list::handle_list_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::RETR,
        entry(Access::LoggedIn, |session, arg| {
            Box::pin(crate::core_ftpcommand::retr::handle_retr_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::RNTO,
        entry(Access::LoggedIn, |session, arg| {
            Box::pin(crate::core_ftpcommand::rnto::handle_rnto_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::STOR,
        entry(Access::Write, |session, arg| {
            Box::pin(crate::core_ftpcommand::stor::handle_stor_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::MKD,
        entry(Access::Write, |session, arg| {
            Box::pin(crate::core_ftpcommand::mkd::handle_mkd_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::RMD,
        entry(Access::Write, |session, arg| {
            Box::pin(crate::core_ftpcommand::rmd::handle_rmd_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::DELE,
        entry(Access::Write, |session, arg| {
            Box::pin(crate::core_ftpcommand::dele::handle_dele_command(session, arg))
        }),
    );

    handlers.insert(
        FtpCommand::RNFR,
        entry(Access::Write, |session, arg| {
            Box::pin(crate::core_ftpcommand::rnfr::handle_rnfr_command(session, arg))
        }),
    );

    handlers
}

/// Runs one command against the session and produces its reply.
///
/// This is the single place where command errors become replies; a failing
/// command never ends the session.
pub async fn dispatch(
    handlers: &CommandTable,
    command: FtpCommand,
    session: &mut Session,
    arg: String,
) -> Reply {
    let Some(entry) = handlers.get(&command) else {
        return Reply::new(502, "Command not implemented.");
    };

    let result = match entry.access.check(session) {
        Ok(()) => (entry.handler)(&mut *session, arg).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(reply) => reply,
        Err(CommandError::Io(e)) => {
            error!("Error handling command {}: {}", command.as_str(), e);
            CommandError::Io(e).to_reply()
        }
        Err(e) => {
            warn!(
                "{} rejected for {:?}: {}",
                command.as_str(),
                session.username(),
                e
            );
            e.to_reply()
        }
    }
}
