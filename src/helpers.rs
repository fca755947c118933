use crate::config::Config;
use log::info;

/// Builds the `HOST/FOLDER` label shown to users, with exactly one slash.
pub fn remote_target(host: &str, folder: &str) -> String {
    format!("{}/{}", host, folder.trim().trim_start_matches('/'))
}

/// Returns true if the value can be sent as an FTP command argument.
pub fn is_single_line(value: &str) -> bool {
    !value.contains(['\r', '\n'])
}

/// Checks a remote filename: non-empty, single line, no path separators.
pub fn check_filename(filename: &str) -> Result<(), &'static str> {
    if filename.trim().is_empty() {
        return Err("o nome do arquivo está vazio");
    }
    if !is_single_line(filename) {
        return Err("o nome do arquivo contém quebra de linha");
    }
    if filename.contains(['/', '\\']) {
        return Err("o nome do arquivo não pode conter barras");
    }
    Ok(())
}

// Helper function to log configuration options
pub fn log_config(config: &Config) {
    info!("  Listen Address: {}", config.server.listen_address);
    info!("  Listen Port: {}", config.server.listen_port);
    info!("  Allowed Origin: {}", config.server.allowed_origin);
    info!(
        "  Max Body Size: {} KB",
        config.server.max_body_bytes / 1024
    );
    info!(
        "  FTP Connect Timeout: {} s",
        config.ftp.connect_timeout_secs
    );
    info!("  FTP Reply Timeout: {} s", config.ftp.reply_timeout_secs);
}
