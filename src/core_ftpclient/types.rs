use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_QUIT_TIMEOUT_MILLIS, DEFAULT_REPLY_TIMEOUT_SECS,
};
use crate::helpers::remote_target;
use std::fmt;
use std::time::Duration;

/// Where and as whom to log in for one upload session.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub remote_folder: String,
}

impl ConnectionConfig {
    /// `CWD` is skipped for an empty folder or the root.
    pub fn needs_cwd(&self) -> bool {
        let folder = self.remote_folder.trim();
        !folder.is_empty() && folder != "/"
    }

    /// `HOST/FOLDER`, used in user-facing messages.
    pub fn target_label(&self) -> String {
        remote_target(&self.host, &self.remote_folder)
    }
}

// Hand-written so the password never lands in a log line
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"********")
            .field("remote_folder", &self.remote_folder)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub filename: String,
    pub payload: Vec<u8>,
}

impl fmt::Debug for TransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferRequest")
            .field("filename", &self.filename)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

/// A validated unit of work for the upload service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FtpJob {
    Test(ConnectionConfig),
    Upload(ConnectionConfig, TransferRequest),
}

impl FtpJob {
    pub fn connection(&self) -> &ConnectionConfig {
        match self {
            FtpJob::Test(config) => config,
            FtpJob::Upload(config, _) => config,
        }
    }

    pub fn transfer(&self) -> Option<&TransferRequest> {
        match self {
            FtpJob::Test(_) => None,
            FtpJob::Upload(_, transfer) => Some(transfer),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            FtpJob::Test(_) => "test",
            FtpJob::Upload(_, _) => "upload",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FtpTimeouts {
    /// Bound on each TCP connect (control and data).
    pub connect: Duration,
    /// Bound on each reply read and on the payload write.
    pub reply: Duration,
    /// Bound on the courtesy QUIT sent on failure paths.
    pub quit: Duration,
}

impl Default for FtpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            reply: Duration::from_secs(DEFAULT_REPLY_TIMEOUT_SECS),
            quit: Duration::from_millis(DEFAULT_QUIT_TIMEOUT_MILLIS),
        }
    }
}
