// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method, header::CONTENT_TYPE},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::{AppState, Config}, docs::ApiDoc, handlers};

fn build_cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Origem CORS inválida ignorada");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}

/// Router completo com todos os middlewares.
pub fn app(app_state: AppState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");
    let uploads = ServeDir::new(app_state.uploads.dir());
    let cors = build_cors_layer(&app_state.config);

    let api_routes = Router::new()
        .route("/itens", get(handlers::items::list_items))
        .route(
            "/points",
            get(handlers::points::list_points).post(handlers::points::create_point),
        )
        .route("/points/{id}", get(handlers::points::get_point))
        .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(api_routes)
        .nest_service("/uploads", uploads)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(app_state)
}
