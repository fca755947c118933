use crate::constants::DEFAULT_FTP_PORT;
use crate::core_ftpclient::types::{ConnectionConfig, FtpJob, TransferRequest};
use crate::helpers::{check_filename, is_single_line};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// JSON body posted by the order-export screen.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequestBody {
    pub content: Option<String>,
    pub filename: Option<String>,
    #[validate(nested)]
    pub ftp_config: FtpConfigBody,
    #[serde(default)]
    pub test_only: bool,
}

#[derive(Deserialize, Validate)]
pub struct FtpConfigBody {
    #[validate(length(min = 1, message = "o host é obrigatório"))]
    pub host: String,
    #[validate(length(min = 1, message = "o usuário é obrigatório"))]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_port")]
    #[validate(range(min = 1, max = 65535, message = "a porta deve estar entre 1 e 65535"))]
    pub port: i64,
    #[serde(default)]
    pub folder: String,
}

fn default_port() -> i64 {
    DEFAULT_FTP_PORT as i64
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Requisição inválida: {0}")]
    Body(String),

    #[error("Configuração FTP inválida: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Configuração FTP inválida: {0}")]
    LineBreak(&'static str),

    #[error("Informe o nome do arquivo a enviar")]
    MissingFilename,

    #[error("Informe o conteúdo do arquivo a enviar")]
    MissingContent,

    #[error("Nome de arquivo inválido: {0}")]
    BadFilename(&'static str),
}

impl UploadRequestBody {
    /// Validates the body and turns it into a test or upload job.
    /// `content` and `filename` are ignored when `testOnly` is set.
    pub fn into_job(self) -> Result<FtpJob, RequestError> {
        self.validate()?;

        let ftp = self.ftp_config;
        let host = ftp.host.trim().to_string();
        if host.is_empty() {
            return Err(RequestError::Body("o host é obrigatório".to_string()));
        }
        for (value, what) in [
            (&ftp.user, "o usuário contém quebra de linha"),
            (&ftp.password, "a senha contém quebra de linha"),
            (&ftp.folder, "a pasta contém quebra de linha"),
        ] {
            if !is_single_line(value) {
                return Err(RequestError::LineBreak(what));
            }
        }

        let config = ConnectionConfig {
            host,
            // range-validated above
            port: ftp.port as u16,
            user: ftp.user,
            password: ftp.password,
            remote_folder: ftp.folder.trim().to_string(),
        };

        if self.test_only {
            return Ok(FtpJob::Test(config));
        }

        let filename = match self.filename {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(RequestError::MissingFilename),
        };
        check_filename(&filename).map_err(RequestError::BadFilename)?;
        let content = self.content.ok_or(RequestError::MissingContent)?;

        Ok(FtpJob::Upload(
            config,
            TransferRequest {
                filename,
                payload: content.into_bytes(),
            },
        ))
    }
}
