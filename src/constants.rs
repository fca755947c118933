// src/constants.rs

pub const DEFAULT_CONFIG_PATH: &str = "/etc/rouillesend.conf";

pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: u16 = 8080;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_FTP_PORT: u16 = 21;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REPLY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_QUIT_TIMEOUT_MILLIS: u64 = 2000;

// Upper bounds for a single control-channel reply
pub const MAX_REPLY_LINE_LEN: u64 = 8192;
pub const MAX_REPLY_LINES: usize = 512;

// Reply codes the upload session branches on
pub const REPLY_DATA_ALREADY_OPEN: u16 = 125;
pub const REPLY_OPENING_DATA: u16 = 150;
pub const REPLY_PASSIVE_MODE: u16 = 227;
pub const REPLY_EXTENDED_PASSIVE_MODE: u16 = 229;
pub const REPLY_LOGGED_IN: u16 = 230;
pub const REPLY_FILE_ACTION_OK: u16 = 250;

pub const UPLOAD_ROUTE: &str = "/ftp-upload";
pub const HEALTH_ROUTE: &str = "/health";
