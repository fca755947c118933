use crate::core_network::network::AppState;
use crate::core_network::request::{RequestError, UploadRequestBody};
use crate::core_network::response::UploadResponse;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use log::{info, warn};

/// Handles one test or upload request.
///
/// Returns 200 when the FTP session succeeded and 500 when it failed. A body
/// that never made it past validation gets 400, or 413 when it is too large.
pub async fn upload_handler(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequestBody>, JsonRejection>,
) -> (StatusCode, Json<UploadResponse>) {
    let parsed = match payload {
        Ok(Json(body)) => body.into_job().map_err(|e| (StatusCode::BAD_REQUEST, e)),
        Err(rejection) => Err((
            rejection_status(&rejection),
            RequestError::Body(rejection.body_text()),
        )),
    };
    let job = match parsed {
        Ok(job) => job,
        Err((status, e)) => {
            warn!("Rejected FTP request ({}): {}", status, e);
            return (status, Json(UploadResponse::rejected(&e)));
        }
    };

    let target = job.connection();
    info!(
        "FTP {} request for {}:{} (folder '{}')",
        job.mode(),
        target.host,
        target.port,
        target.remote_folder
    );

    match state.service.run(&job).await {
        Ok(message) => (StatusCode::OK, Json(UploadResponse::success(message))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(UploadResponse::failure(&e)),
        ),
    }
}

// Only the size limit keeps its own status; every other body problem is a 400
fn rejection_status(rejection: &JsonRejection) -> StatusCode {
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// CORS preflight: empty 200, headers are added by the router layer.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}
