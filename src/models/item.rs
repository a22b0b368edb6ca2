// src/models/item.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::config::Config;

// --- Item (material reciclável) ---
// Dado de referência: vem da migração de seed e nunca é alterado pela API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Lâmpadas")]
    pub title: String,
    #[schema(example = "lampadas.svg")]
    pub image: String,
}

// Forma devolvida em GET /itens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemView {
    pub id: i32,
    pub title: String,
    #[schema(example = "http://localhost:3333/uploads/lampadas.svg")]
    pub image_url: String,
}

impl ItemView {
    pub fn from_item(item: Item, config: &Config) -> Self {
        Self {
            image_url: config.image_url(&item.image),
            id: item.id,
            title: item.title,
        }
    }
}

// Só o título, como aparece no detalhe de um ponto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ItemTitle {
    #[schema(example = "Óleo de Cozinha")]
    pub title: String,
}
