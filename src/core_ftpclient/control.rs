use crate::constants::{MAX_REPLY_LINES, MAX_REPLY_LINE_LEN};
use crate::core_ftpclient::command::FtpCommand;
use crate::core_ftpclient::error::FtpError;
use crate::core_ftpclient::reply::{FtpReply, ReplyLine};
use crate::core_ftpclient::types::FtpTimeouts;
use log::debug;
use std::net::IpAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// The control connection of one session. Commands and replies strictly
/// alternate; nothing is pipelined.
pub struct ControlChannel<T> {
    stream: BufReader<T>,
    reply_timeout: Duration,
    line_buf: Vec<u8>,
}

impl ControlChannel<TcpStream> {
    pub async fn connect(host: &str, port: u16, timeouts: &FtpTimeouts) -> Result<Self, FtpError> {
        debug!("Connecting control channel to {}:{}", host, port);
        let stream = match timeout(timeouts.connect, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => {
                return Err(FtpError::Connect {
                    host: host.to_string(),
                    port,
                    source,
                })
            }
            Err(_) => {
                return Err(FtpError::ConnectTimedOut {
                    host: host.to_string(),
                    port,
                })
            }
        };
        Ok(Self::new(stream, timeouts.reply))
    }

    /// Address of the server this channel is connected to. The data
    /// connection goes here so that it reaches the same machine.
    pub fn peer_ip(&self) -> Result<IpAddr, FtpError> {
        Ok(self.stream.get_ref().peer_addr()?.ip())
    }
}

impl<T> ControlChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: T, reply_timeout: Duration) -> Self {
        Self {
            stream: BufReader::new(stream),
            reply_timeout,
            line_buf: Vec::with_capacity(256),
        }
    }

    /// Reads one complete reply, following multi-line continuations.
    pub async fn read_reply(&mut self) -> Result<FtpReply, FtpError> {
        let reply = timeout(self.reply_timeout, self.read_reply_lines())
            .await
            .map_err(|_| FtpError::Timeout("a resposta do servidor FTP"))??;
        debug!("<- {}", reply);
        Ok(reply)
    }

    /// Sends one command line.
    pub async fn send(&mut self, command: FtpCommand<'_>) -> Result<(), FtpError> {
        let line = command.to_wire()?;
        debug!("-> {}", command);
        let writer = self.stream.get_mut();
        timeout(self.reply_timeout, async {
            writer.write_all(line.as_bytes()).await?;
            writer.flush().await
        })
        .await
        .map_err(|_| FtpError::Timeout("o envio de comando ao servidor FTP"))??;
        Ok(())
    }

    /// Sends a command and waits for its reply.
    pub async fn command(&mut self, command: FtpCommand<'_>) -> Result<FtpReply, FtpError> {
        self.send(command).await?;
        self.read_reply().await
    }

    /// Best-effort QUIT followed by socket shutdown. Errors are swallowed.
    pub async fn quit(mut self, grace: Duration) {
        let result = timeout(grace, self.command(FtpCommand::Quit)).await;
        match result {
            Ok(Ok(reply)) => debug!("QUIT acknowledged: {}", reply),
            Ok(Err(e)) => debug!("QUIT failed, closing anyway: {}", e),
            Err(_) => debug!("No QUIT reply within {:?}, closing anyway", grace),
        }
        self.close().await;
    }

    /// Closes the control connection without a QUIT.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.get_mut().shutdown().await {
            debug!("Ignoring control channel shutdown error: {}", e);
        }
    }

    async fn read_reply_lines(&mut self) -> Result<FtpReply, FtpError> {
        let line = self.read_line().await?;
        let first = ReplyLine::parse(&line)?;
        if !first.continued {
            return Ok(FtpReply::new(first.code, first.text));
        }

        let mut lines = vec![first.text.clone()];
        loop {
            if lines.len() >= MAX_REPLY_LINES {
                return Err(FtpError::MalformedReply(format!(
                    "resposta {} com mais de {} linhas",
                    first.code, MAX_REPLY_LINES
                )));
            }
            let line = self.read_line().await?;
            if first.is_terminator(&line) {
                lines.push(ReplyLine::parse(&line)?.text);
                break;
            }
            lines.push(line.trim_end().to_string());
        }
        Ok(FtpReply::new(first.code, lines.join("\n")))
    }

    async fn read_line(&mut self) -> Result<String, FtpError> {
        self.line_buf.clear();
        let n = (&mut self.stream)
            .take(MAX_REPLY_LINE_LEN)
            .read_until(b'\n', &mut self.line_buf)
            .await?;
        if n == 0 {
            return Err(FtpError::ConnectionClosed);
        }
        if self.line_buf.last() != Some(&b'\n') && n as u64 >= MAX_REPLY_LINE_LEN {
            return Err(FtpError::MalformedReply(format!(
                "linha de resposta com mais de {} bytes",
                MAX_REPLY_LINE_LEN
            )));
        }
        Ok(String::from_utf8_lossy(&self.line_buf).into_owned())
    }
}
