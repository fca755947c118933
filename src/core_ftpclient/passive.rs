use crate::constants::{REPLY_EXTENDED_PASSIVE_MODE, REPLY_PASSIVE_MODE};
use crate::core_ftpclient::command::FtpCommand;
use crate::core_ftpclient::control::ControlChannel;
use crate::core_ftpclient::error::FtpError;
use log::{debug, info};
use tokio::io::{AsyncRead, AsyncWrite};

/// Negotiates a passive data port, trying EPSV first and falling back to PASV.
///
/// Only the port is taken from the server. Any address in the reply is
/// ignored because servers behind NAT routinely advertise addresses the
/// client cannot reach; the caller reconnects to the control-channel host.
///
/// A `229` reply whose tuple cannot be parsed falls through to PASV.
pub async fn negotiate_passive_port<T>(control: &mut ControlChannel<T>) -> Result<u16, FtpError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let epsv = control.command(FtpCommand::Epsv).await?;
    if epsv.code == REPLY_EXTENDED_PASSIVE_MODE {
        if let Some(port) = epsv.epsv_port() {
            debug!("EPSV negotiated data port {}", port);
            return Ok(port);
        }
        info!("Unparseable EPSV reply, falling back to PASV: {}", epsv);
    } else {
        debug!("EPSV not available ({}), falling back to PASV", epsv);
    }

    let pasv = control.command(FtpCommand::Pasv).await?;
    if pasv.code == REPLY_PASSIVE_MODE {
        if let Some((advertised, port)) = pasv.pasv_address() {
            debug!(
                "PASV negotiated data port {} (advertised host {} ignored)",
                port, advertised
            );
            return Ok(port);
        }
    }

    Err(FtpError::PassiveNegotiation)
}
