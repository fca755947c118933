// Error handling for the FTP upload client
use crate::core_ftpclient::reply::FtpReply;
use serde::Serialize;
use std::io;
use thiserror::Error;

/// Stable, machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FtpErrorKind {
    ConnectionFailure,
    ServiceUnavailable,
    AuthenticationFailure,
    DirectoryFailure,
    PassiveNegotiationFailure,
    DataConnectionFailure,
    TransferInitiationFailure,
    TransportError,
    InvalidRequest,
}

// Display strings are shown to the end user as-is.
#[derive(Error, Debug)]
pub enum FtpError {
    #[error("Não foi possível conectar ao servidor {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("Tempo esgotado ao conectar ao servidor {host}:{port}")]
    ConnectTimedOut { host: String, port: u16 },

    #[error("Servidor FTP indisponível: {0}")]
    ServiceUnavailable(FtpReply),

    #[error("Login falhou: usuário ou senha incorretos ({0})")]
    Authentication(FtpReply),

    #[error("Pasta '{folder}' não encontrada no servidor ({reply})")]
    Directory { folder: String, reply: FtpReply },

    #[error("Falha ao negociar o modo passivo com o servidor")]
    PassiveNegotiation,

    #[error("Não foi possível abrir a conexão de dados em {host}:{port}: {reason}")]
    DataConnect {
        host: String,
        port: u16,
        reason: String,
    },

    #[error("O servidor recusou o envio de '{filename}' ({reply})")]
    TransferInitiation { filename: String, reply: FtpReply },

    #[error("Tempo esgotado aguardando {0}")]
    Timeout(&'static str),

    #[error("O servidor encerrou a conexão inesperadamente")]
    ConnectionClosed,

    #[error("Resposta inválida do servidor FTP: {0}")]
    MalformedReply(String),

    #[error("Parâmetro inválido: {0}")]
    InvalidArgument(&'static str),

    #[error("Erro de comunicação com o servidor FTP: {0}")]
    Io(#[from] io::Error),
}

impl FtpError {
    pub fn kind(&self) -> FtpErrorKind {
        match self {
            FtpError::Connect { .. } | FtpError::ConnectTimedOut { .. } => {
                FtpErrorKind::ConnectionFailure
            }
            FtpError::ServiceUnavailable(_) => FtpErrorKind::ServiceUnavailable,
            FtpError::Authentication(_) => FtpErrorKind::AuthenticationFailure,
            FtpError::Directory { .. } => FtpErrorKind::DirectoryFailure,
            FtpError::PassiveNegotiation => FtpErrorKind::PassiveNegotiationFailure,
            FtpError::DataConnect { .. } => FtpErrorKind::DataConnectionFailure,
            FtpError::TransferInitiation { .. } => FtpErrorKind::TransferInitiationFailure,
            FtpError::InvalidArgument(_) => FtpErrorKind::InvalidRequest,
            FtpError::Timeout(_)
            | FtpError::ConnectionClosed
            | FtpError::MalformedReply(_)
            | FtpError::Io(_) => FtpErrorKind::TransportError,
        }
    }
}
