#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    USER,
    PASS,
    PWD,
    CWD,
    TYPE,
    PASV,
    LIST,
    RETR,
    STOR,
    MKD,
    RMD,
    DELE,
    RNFR,
    RNTO,
    QUIT,
}

impl FtpCommand {
    pub const ALL: [FtpCommand; 15] = [
        FtpCommand::USER,
        FtpCommand::PASS,
        FtpCommand::PWD,
        FtpCommand::CWD,
        FtpCommand::TYPE,
        FtpCommand::PASV,
        FtpCommand::LIST,
        FtpCommand::RETR,
        FtpCommand::STOR,
        FtpCommand::MKD,
        FtpCommand::RMD,
        FtpCommand::DELE,
        FtpCommand::RNFR,
        FtpCommand::RNTO,
        FtpCommand::QUIT,
    ];

    /// Case-insensitive lookup of a command verb.
    pub fn from_str(cmd: &str) -> Option<FtpCommand> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str().eq_ignore_ascii_case(cmd))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FtpCommand::USER => "USER",
            FtpCommand::PASS => "PASS",
            FtpCommand::PWD => "PWD",
            FtpCommand::CWD => "CWD",
            FtpCommand::TYPE => "TYPE",
            FtpCommand::PASV => "PASV",
            FtpCommand::LIST => "LIST",
            FtpCommand::RETR => "RETR",
            FtpCommand::STOR => "STOR",
            FtpCommand::MKD => "MKD",
            FtpCommand::RMD => "RMD",
            FtpCommand::DELE => "DELE",
            FtpCommand::RNFR => "RNFR",
            FtpCommand::RNTO => "RNTO",
            FtpCommand::QUIT => "QUIT",
        }
    }

    /// Commands that change the remote filesystem.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            FtpCommand::STOR
                | FtpCommand::MKD
                | FtpCommand::RMD
                | FtpCommand::DELE
                | FtpCommand::RNFR
                | FtpCommand::RNTO
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for command in FtpCommand::ALL {
            assert_eq!(FtpCommand::from_str(command.as_str()), Some(command));
        }
        assert_eq!(FtpCommand::from_str("retr"), Some(FtpCommand::RETR));
        assert_eq!(FtpCommand::from_str("PORT"), None);
    }
}
