// src/handlers/items.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::item::ItemView,
};

// GET /itens
#[utoipa::path(
    get,
    path = "/itens",
    tag = "Items",
    responses(
        (status = 200, description = "Catálogo de materiais recicláveis", body = Vec<ItemView>),
        (status = 500, description = "Falha ao consultar o banco")
    )
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .item_service
        .get_all_items()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let serialized: Vec<ItemView> = items
        .into_iter()
        .map(|item| ItemView::from_item(item, &app_state.config))
        .collect();

    Ok((StatusCode::OK, Json(serialized)))
}
