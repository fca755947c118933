use crate::core_ftpclient::error::{FtpError, FtpErrorKind};
use crate::core_network::request::RequestError;
use serde::Serialize;

/// `{success: true, message}` or `{success: false, error, kind}`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FtpErrorKind>,
}

impl UploadResponse {
    pub fn success(message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            error: None,
            kind: None,
        }
    }

    pub fn failure(err: &FtpError) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(err.to_string()),
            kind: Some(err.kind()),
        }
    }

    pub fn rejected(err: &RequestError) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(err.to_string()),
            kind: Some(FtpErrorKind::InvalidRequest),
        }
    }
}
