// HTTP endpoint in front of the FTP upload client
pub mod handlers;
pub mod network;
pub mod request;
pub mod response;


pub use network::{create_router, start_server, AppState};
