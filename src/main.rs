use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use env_logger::{Builder, Env};
use log::info;
use rouillesend::config::Config;
use rouillesend::constants::DEFAULT_CONFIG_PATH;
use rouillesend::core_cli::{Cli, Commands};
use rouillesend::core_ftpclient::{ConnectionConfig, FtpJob, FtpUploadService, TransferRequest};
use rouillesend::core_network::start_server;
use rouillesend::helpers::log_config;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let args = Cli::parse();

    // Initialize the logger with a custom format
    let default_level = if args.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    let config = load_config(&args.config)?;

    match args.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            log_config(&config);
            start_server(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Test { ftp } => {
            let job = FtpJob::Test(ConnectionConfig::from(ftp));
            Ok(run_once(&config, job).await)
        }
        Commands::Send { file, name, ftp } => {
            let payload = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let filename = match name {
                Some(name) => name,
                None => file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .with_context(|| format!("No file name in {}", file.display()))?,
            };
            let job = FtpJob::Upload(
                ConnectionConfig::from(ftp),
                TransferRequest { filename, payload },
            );
            Ok(run_once(&config, job).await)
        }
    }
}

// Explicit path, then the system-wide file if present, then built-in defaults.
fn load_config(path: &str) -> Result<Config> {
    if !path.is_empty() {
        return Config::load_from_file(path);
    }
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return Config::load_from_file(DEFAULT_CONFIG_PATH);
    }
    info!("No configuration file, using defaults");
    Ok(Config::default())
}

async fn run_once(config: &Config, job: FtpJob) -> ExitCode {
    let service = FtpUploadService::new(config.ftp.timeouts());
    match service.run(&job).await {
        Ok(message) => {
            println!("{} {}", "OK".green().bold(), message);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "ERRO".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
