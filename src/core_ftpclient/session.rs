use crate::constants::{
    REPLY_DATA_ALREADY_OPEN, REPLY_FILE_ACTION_OK, REPLY_LOGGED_IN, REPLY_OPENING_DATA,
};
use crate::core_ftpclient::command::FtpCommand;
use crate::core_ftpclient::control::ControlChannel;
use crate::core_ftpclient::data::DataChannel;
use crate::core_ftpclient::error::FtpError;
use crate::core_ftpclient::passive::negotiate_passive_port;
use crate::core_ftpclient::reply::ReplyClass;
use crate::core_ftpclient::types::{ConnectionConfig, FtpJob, FtpTimeouts, TransferRequest};
use crate::helpers::{check_filename, is_single_line};
use log::{debug, info, warn};
use std::fmt;
use tokio::net::TcpStream;

/// Progress of one upload session. A failure in any state ends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Connected,
    Authenticated,
    DirectoryChanged,
    PassiveNegotiated,
    DataConnected,
    Uploaded,
    TestDone,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Runs test or upload sessions against remote FTP servers.
///
/// Every call opens a fresh control connection and closes it (and the data
/// connection, if any) before returning. Nothing is retried and no state is
/// shared between calls, so one service can be used from many tasks at once.
#[derive(Debug, Clone, Default)]
pub struct FtpUploadService {
    timeouts: FtpTimeouts,
}

struct Session {
    state: SessionState,
}

impl Session {
    fn advance(&mut self, next: SessionState) {
        debug!("Session state {} -> {}", self.state, next);
        self.state = next;
    }
}

impl FtpUploadService {
    pub fn new(timeouts: FtpTimeouts) -> Self {
        Self { timeouts }
    }

    pub async fn run(&self, job: &FtpJob) -> Result<String, FtpError> {
        self.execute(job.connection(), job.transfer()).await
    }

    /// Test mode when `transfer` is `None`, upload mode otherwise. Returns
    /// the user-facing confirmation message.
    pub async fn execute(
        &self,
        config: &ConnectionConfig,
        transfer: Option<&TransferRequest>,
    ) -> Result<String, FtpError> {
        check_arguments(config, transfer)?;

        let mut session = Session {
            state: SessionState::Connecting,
        };
        let result = self.drive(&mut session, config, transfer).await;
        match &result {
            Ok(message) => info!(
                "FTP session to {}:{} done: {}",
                config.host, config.port, message
            ),
            Err(e) => warn!(
                "FTP session to {}:{} failed in state {}: {}",
                config.host, config.port, session.state, e
            ),
        }
        result
    }

    async fn drive(
        &self,
        session: &mut Session,
        config: &ConnectionConfig,
        transfer: Option<&TransferRequest>,
    ) -> Result<String, FtpError> {
        let mut control =
            ControlChannel::connect(&config.host, config.port, &self.timeouts).await?;
        session.advance(SessionState::Connected);

        match self.converse(session, &mut control, config, transfer).await {
            Ok(message) => {
                control.quit(self.timeouts.reply).await;
                Ok(message)
            }
            Err(e) => {
                control.quit(self.timeouts.quit).await;
                Err(e)
            }
        }
    }

    async fn converse(
        &self,
        session: &mut Session,
        control: &mut ControlChannel<TcpStream>,
        config: &ConnectionConfig,
        transfer: Option<&TransferRequest>,
    ) -> Result<String, FtpError> {
        let greeting = control.read_reply().await?;
        if greeting.is_negative() {
            return Err(FtpError::ServiceUnavailable(greeting));
        }

        let user = control.command(FtpCommand::User(&config.user)).await?;
        debug!("USER reply: {}", user);

        let pass = control.command(FtpCommand::Pass(&config.password)).await?;
        if pass.code != REPLY_LOGGED_IN {
            return Err(FtpError::Authentication(pass));
        }
        session.advance(SessionState::Authenticated);

        if config.needs_cwd() {
            let folder = config.remote_folder.trim();
            let cwd = control.command(FtpCommand::Cwd(folder)).await?;
            if cwd.code != REPLY_FILE_ACTION_OK {
                return Err(FtpError::Directory {
                    folder: folder.to_string(),
                    reply: cwd,
                });
            }
            session.advance(SessionState::DirectoryChanged);
        }

        let Some(transfer) = transfer else {
            session.advance(SessionState::TestDone);
            return Ok(format!("Conexão estabelecida com {}", config.host));
        };

        self.upload(session, control, transfer).await?;
        Ok(format!(
            "{} enviado para {}",
            transfer.filename,
            config.target_label()
        ))
    }

    async fn upload(
        &self,
        session: &mut Session,
        control: &mut ControlChannel<TcpStream>,
        transfer: &TransferRequest,
    ) -> Result<(), FtpError> {
        let type_reply = control.command(FtpCommand::TypeBinary).await?;
        if type_reply.is_negative() {
            debug!("TYPE I refused, continuing: {}", type_reply);
        }

        let port = negotiate_passive_port(control).await?;
        session.advance(SessionState::PassiveNegotiated);

        let data_host = control.peer_ip()?;
        let data = DataChannel::connect(data_host, port, self.timeouts.connect).await?;
        session.advance(SessionState::DataConnected);

        let stor = match control.command(FtpCommand::Stor(&transfer.filename)).await {
            Ok(reply) => reply,
            Err(e) => {
                data.close().await;
                return Err(e);
            }
        };
        if stor.code != REPLY_OPENING_DATA && stor.code != REPLY_DATA_ALREADY_OPEN {
            data.close().await;
            return Err(FtpError::TransferInitiation {
                filename: transfer.filename.clone(),
                reply: stor,
            });
        }

        let written = data
            .send_payload(&transfer.payload, self.timeouts.reply)
            .await?;
        session.advance(SessionState::Uploaded);

        let complete = control.read_reply().await?;
        if complete.class() == ReplyClass::Completion {
            debug!("Transfer of {} bytes confirmed: {}", written, complete);
        } else {
            warn!(
                "Unexpected reply after sending {} ({} bytes): {}",
                transfer.filename, written, complete
            );
        }
        Ok(())
    }
}

// Input checks that do not need the network. The HTTP boundary performs the
// same checks; this guards direct library callers.
fn check_arguments(
    config: &ConnectionConfig,
    transfer: Option<&TransferRequest>,
) -> Result<(), FtpError> {
    if config.host.trim().is_empty() {
        return Err(FtpError::InvalidArgument("o host está vazio"));
    }
    if config.port == 0 {
        return Err(FtpError::InvalidArgument("a porta deve estar entre 1 e 65535"));
    }
    if config.user.is_empty() {
        return Err(FtpError::InvalidArgument("o usuário está vazio"));
    }
    if ![&config.user, &config.password, &config.remote_folder]
        .iter()
        .all(|value| is_single_line(value))
    {
        return Err(FtpError::InvalidArgument("o valor contém quebra de linha"));
    }
    if let Some(transfer) = transfer {
        check_filename(&transfer.filename).map_err(FtpError::InvalidArgument)?;
    }
    Ok(())
}
