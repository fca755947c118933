use crate::config::Config;
use crate::constants::{HEALTH_ROUTE, UPLOAD_ROUTE};
use crate::core_ftpclient::FtpUploadService;
use crate::core_network::handlers::{preflight_handler, upload_handler};
use anyhow::{Context, Result};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::HeaderValue;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{middleware, Router};
use log::info;
use tokio::net::TcpListener;

const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
const CORS_ALLOW_METHODS: &str = "POST, OPTIONS";

#[derive(Clone)]
pub struct AppState {
    pub service: FtpUploadService,
    pub allowed_origin: HeaderValue,
}

impl AppState {
    pub fn new(service: FtpUploadService, allowed_origin: &str) -> Result<Self> {
        let allowed_origin = HeaderValue::from_str(allowed_origin)
            .with_context(|| format!("Invalid allowed_origin: {}", allowed_origin))?;
        Ok(Self {
            service,
            allowed_origin,
        })
    }
}

async fn add_cors_headers(State(state): State<AppState>, mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, state.allowed_origin.clone());
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    response
}

/// Builds the router: the upload endpoint on `/` and `/ftp-upload`, plus a
/// health check. Every response carries the CORS headers.
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(HEALTH_ROUTE, get(|| async { "OK" }))
        .route("/", post(upload_handler).options(preflight_handler))
        .route(UPLOAD_ROUTE, post(upload_handler).options(preflight_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::map_response_with_state(
            state.clone(),
            add_cors_headers,
        ))
        .with_state(state)
}

/// Binds the configured address and serves requests until the process ends.
pub async fn start_server(config: &Config) -> Result<()> {
    let service = FtpUploadService::new(config.ftp.timeouts());
    let state = AppState::new(service, &config.server.allowed_origin)?;
    let router = create_router(state, config.server.max_body_bytes);

    let bind_address = format!(
        "{}:{}",
        config.server.listen_address, config.server.listen_port
    );
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Server listening on {}", bind_address);

    axum::serve(listener, router)
        .await
        .context("HTTP server stopped")?;
    Ok(())
}
