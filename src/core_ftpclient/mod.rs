// FTP upload client: control channel, passive data channel, one STOR per session
pub mod command;
pub mod control;
pub mod data;
pub mod error;
pub mod passive;
pub mod reply;
pub mod session;
pub mod types;

#[cfg(test)]
mod test_session;

pub use error::{FtpError, FtpErrorKind};
pub use session::FtpUploadService;
pub use types::{ConnectionConfig, FtpJob, FtpTimeouts, TransferRequest};
