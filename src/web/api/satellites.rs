use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::positions::{NearbyResponse, ObserverParameters, PositionService};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct NearbyQuery {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub elevation_m: f64,
    #[serde(default = "default_radius")]
    pub search_radius_deg: u32,
    #[serde(default)]
    pub category: u32,
}

fn default_radius() -> u32 {
    90
}

#[utoipa::path(
    get,
    path = "/api/satellites/nearby",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Satellites above the observer", body = NearbyResponse),
        (status = 502, description = "Position service error", body = ErrorResponse)
    ),
    tag = "satellites"
)]
pub async fn nearby(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> ApiResult<Json<NearbyResponse>> {
    let observer = ObserverParameters {
        latitude_deg: query.latitude_deg,
        longitude_deg: query.longitude_deg,
        elevation_m: query.elevation_m,
        duration_min: 1,
    };
    observer
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let response = state
        .service
        .nearby(observer, query.search_radius_deg, query.category)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok(Json(response))
}
