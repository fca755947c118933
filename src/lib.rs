pub mod config;
pub mod constants;
pub mod core_cli;
pub mod core_ftpclient;
pub mod core_network;
pub mod helpers;
