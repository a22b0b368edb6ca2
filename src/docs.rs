// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ecoleta API",
        description = "Pontos de coleta de materiais recicláveis"
    ),
    paths(
        // --- Items ---
        handlers::items::list_items,

        // --- Points ---
        handlers::points::list_points,
        handlers::points::get_point,
        handlers::points::create_point,
    ),
    components(
        schemas(
            // --- Items ---
            models::item::Item,
            models::item::ItemView,
            models::item::ItemTitle,

            // --- Points ---
            models::point::Point,
            models::point::PointView,
            models::point::PointDetail,

            // --- Payloads ---
            handlers::points::CreatePointPayload,
        )
    ),
    tags(
        (name = "Items", description = "Catálogo de materiais recicláveis"),
        (name = "Points", description = "Cadastro e busca de pontos de coleta")
    )
)]
pub struct ApiDoc;
