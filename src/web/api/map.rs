use axum::{extract::State, Json};

use crate::render::DrawOp;
use crate::web::server::AppState;

#[utoipa::path(
    get,
    path = "/api/map",
    responses(
        (status = 200, description = "Draw operations of the base map surface, painted once at startup", body = Vec<DrawOp>)
    ),
    tag = "map"
)]
pub async fn base_map(State(state): State<AppState>) -> Json<Vec<DrawOp>> {
    Json(state.base_ops.as_ref().clone())
}
