use crate::constants::DEFAULT_FTP_PORT;
use crate::core_ftpclient::types::ConnectionConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "rouillesend",
    about = "Delivers exported orders to FTP servers, over HTTP or from the shell."
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP endpoint (default)
    Serve,

    /// Log in, change to the folder and quit, without sending anything
    Test {
        #[command(flatten)]
        ftp: FtpArgs,
    },

    /// Upload one local file
    Send {
        /// Local file to upload
        file: PathBuf,

        /// Remote file name (defaults to the local file name)
        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        ftp: FtpArgs,
    },
}

/// Connection settings for one-shot commands
#[derive(Args, Debug)]
pub struct FtpArgs {
    /// FTP server host name or address
    #[arg(long)]
    pub host: String,

    /// FTP control port
    #[arg(long, default_value_t = DEFAULT_FTP_PORT, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Login name
    #[arg(short, long)]
    pub user: String,

    /// Password
    #[arg(short, long, env = "FTP_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Remote folder to upload into
    #[arg(short, long, default_value = "/")]
    pub folder: String,
}

impl From<FtpArgs> for ConnectionConfig {
    fn from(args: FtpArgs) -> Self {
        ConnectionConfig {
            host: args.host,
            port: args.port,
            user: args.user,
            password: args.password,
            remote_folder: args.folder,
        }
    }
}
