use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::animator::{Animator, RenderContext};
use crate::config::Config;
use crate::geo::{self, Projection};
use crate::positions::HttpPositionService;
use crate::render::{render_base_map, DrawOp, RecordingSurface, SharedSurface};

use super::api::map as map_handlers;
use super::api::satellites as satellite_handlers;
use super::api::track as track_handlers;
use super::api_doc::ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub animator: Arc<Mutex<Animator<HttpPositionService>>>,
    pub service: Arc<HttpPositionService>,
    pub base_ops: Arc<Vec<DrawOp>>,
    pub overlay: SharedSurface,
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let projection = Arc::new(Projection::new(config.projection));
    let mut base = RecordingSurface::new(config.projection.width, config.projection.height);

    // Load the world geometry once and paint the base surface. A failed
    // fetch is recoverable: the engine runs over a blank base map.
    let http = reqwest::Client::new();
    match geo::fetch_geometry(&http, &config.map.geometry_url).await {
        Ok(geometry) => {
            render_base_map(&geometry, &projection, &mut base);
            log::info!("base map painted ({} land polygons)", geometry.land.len());
        }
        Err(e) => log::error!("failed to fetch world map data: {e}"),
    }

    let overlay = SharedSurface::new(config.projection.width, config.projection.height);
    let service = Arc::new(HttpPositionService::new(
        config.positions.base_url.clone(),
        config.positions.api_key.clone(),
    ));
    let context = RenderContext::new(projection, overlay.clone());
    let animator = Animator::new(service.clone(), context);

    let state = AppState {
        animator: Arc::new(Mutex::new(animator)),
        service,
        base_ops: Arc::new(base.snapshot()),
        overlay,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Tracking endpoints
        .route("/api/track", post(track_handlers::start_track))
        .route("/api/track/status", get(track_handlers::status))
        .route("/api/track/frame", get(track_handlers::frame))
        // Base map surface
        .route("/api/map", get(map_handlers::base_map))
        // Selection UI support
        .route(
            "/api/satellites/nearby",
            get(satellite_handlers::nearby),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
