use crate::core_ftpclient::error::FtpError;
use log::debug;
use std::net::IpAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// The passive-mode data connection, used for exactly one STOR.
pub struct DataChannel {
    stream: TcpStream,
}

impl DataChannel {
    /// Opens the data connection. `host` is always the peer address of the
    /// control connection, never an address advertised by the server.
    pub async fn connect(
        host: IpAddr,
        port: u16,
        connect_timeout: Duration,
    ) -> Result<Self, FtpError> {
        debug!("Opening data channel to {}:{}", host, port);
        match timeout(connect_timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => Ok(Self { stream }),
            Ok(Err(e)) => Err(FtpError::DataConnect {
                host: host.to_string(),
                port,
                reason: e.to_string(),
            }),
            Err(_) => Err(FtpError::DataConnect {
                host: host.to_string(),
                port,
                reason: "tempo esgotado".to_string(),
            }),
        }
    }

    /// Writes the whole payload and closes the connection, which marks the
    /// end of the file for the server.
    pub async fn send_payload(
        mut self,
        payload: &[u8],
        write_timeout: Duration,
    ) -> Result<usize, FtpError> {
        let stream = &mut self.stream;
        timeout(write_timeout, async {
            stream.write_all(payload).await?;
            stream.flush().await?;
            stream.shutdown().await
        })
        .await
        .map_err(|_| FtpError::Timeout("o envio do arquivo"))??;
        debug!("Data channel wrote {} bytes", payload.len());
        Ok(payload.len())
    }

    /// Closes the connection without sending anything.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            debug!("Ignoring data channel shutdown error: {}", e);
        }
    }
}
