use utoipa::OpenApi;

use crate::animator::{SessionSnapshot, SessionStatus};
use crate::positions::{NearbyResponse, NearbySatellite, ObserverParameters};
use crate::render::DrawOp;

use super::api::error::ErrorResponse;
use super::api::track::TrackRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::track::start_track,
        super::api::track::status,
        super::api::track::frame,
        super::api::map::base_map,
        super::api::satellites::nearby,
    ),
    components(
        schemas(
            TrackRequest,
            ObserverParameters,
            SessionSnapshot,
            SessionStatus,
            DrawOp,
            NearbyResponse,
            NearbySatellite,
            ErrorResponse,
        )
    ),
    info(
        title = "Passmap Tracking API",
        description = "API for driving satellite ground-track animation sessions",
        version = "0.1.0"
    ),
    tags(
        (name = "track", description = "Animation sessions"),
        (name = "map", description = "Base map surface"),
        (name = "satellites", description = "Satellite lookup for the selection UI")
    )
)]
pub struct ApiDoc;
