use axum::{extract::State, Json};
use serde::Deserialize;

use crate::animator::{AnimatorError, SessionSnapshot};
use crate::positions::{ObserverParameters, SatelliteSelection};
use crate::render::DrawOp;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

/// One tracking request from the selection UI: which satellites, seen
/// from where, over what horizon.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TrackRequest {
    pub selection: SatelliteSelection,
    pub observer: ObserverParameters,
}

#[utoipa::path(
    post,
    path = "/api/track",
    request_body = TrackRequest,
    responses(
        (status = 200, description = "Session started", body = SessionSnapshot),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "A session is already active", body = ErrorResponse)
    ),
    tag = "track"
)]
pub async fn start_track(
    State(state): State<AppState>,
    Json(request): Json<TrackRequest>,
) -> ApiResult<Json<SessionSnapshot>> {
    request
        .observer
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let mut animator = state.animator.lock().await;
    animator
        .start(request.selection, request.observer)
        .map_err(map_animator_error)?;

    Ok(Json(animator.status()))
}

#[utoipa::path(
    get,
    path = "/api/track/status",
    responses(
        (status = 200, description = "Session state", body = SessionSnapshot)
    ),
    tag = "track"
)]
pub async fn status(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let animator = state.animator.lock().await;
    Json(animator.status())
}

#[utoipa::path(
    get,
    path = "/api/track/frame",
    responses(
        (status = 200, description = "Draw operations of the current overlay frame", body = Vec<DrawOp>)
    ),
    tag = "track"
)]
pub async fn frame(State(state): State<AppState>) -> Json<Vec<DrawOp>> {
    Json(state.overlay.snapshot())
}

fn map_animator_error(err: AnimatorError) -> ApiError {
    match err {
        AnimatorError::Busy => ApiError::Busy(err.to_string()),
        AnimatorError::EmptySelection | AnimatorError::NoPositionData => {
            ApiError::Validation(err.to_string())
        }
        AnimatorError::Fetch(e) => ApiError::Upstream(e.to_string()),
    }
}
