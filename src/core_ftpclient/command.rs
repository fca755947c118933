use crate::core_ftpclient::error::FtpError;
use crate::helpers::is_single_line;
use std::fmt;

/// The commands an upload session sends on the control channel.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand<'a> {
    User(&'a str),
    Pass(&'a str),
    Cwd(&'a str),
    TypeBinary,
    Epsv,
    Pasv,
    Stor(&'a str),
    Quit,
}

impl<'a> FtpCommand<'a> {
    pub fn verb(&self) -> &'static str {
        match self {
            FtpCommand::User(_) => "USER",
            FtpCommand::Pass(_) => "PASS",
            FtpCommand::Cwd(_) => "CWD",
            FtpCommand::TypeBinary => "TYPE",
            FtpCommand::Epsv => "EPSV",
            FtpCommand::Pasv => "PASV",
            FtpCommand::Stor(_) => "STOR",
            FtpCommand::Quit => "QUIT",
        }
    }

    fn argument(&self) -> Option<&'a str> {
        match self {
            FtpCommand::User(arg)
            | FtpCommand::Pass(arg)
            | FtpCommand::Cwd(arg)
            | FtpCommand::Stor(arg) => Some(arg),
            FtpCommand::TypeBinary => Some("I"),
            FtpCommand::Epsv | FtpCommand::Pasv | FtpCommand::Quit => None,
        }
    }

    /// Renders the CRLF-terminated line, refusing arguments that would
    /// smuggle a second command onto the wire.
    pub fn to_wire(&self) -> Result<String, FtpError> {
        match self.argument() {
            Some(arg) if !is_single_line(arg) => Err(FtpError::InvalidArgument(
                "o valor contém quebra de linha",
            )),
            Some(arg) => Ok(format!("{} {}\r\n", self.verb(), arg)),
            None => Ok(format!("{}\r\n", self.verb())),
        }
    }
}

// Log-safe rendering: the PASS argument is masked.
impl fmt::Display for FtpCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.argument()) {
            (FtpCommand::Pass(_), _) => write!(f, "PASS ****"),
            (_, Some(arg)) => write!(f, "{} {}", self.verb(), arg),
            (_, None) => write!(f, "{}", self.verb()),
        }
    }
}
