// src/models/point.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::{config::Config, models::item::ItemTitle};

// --- Ponto de coleta ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Point {
    #[schema(example = 1)]
    pub id: i32,
    /// Nome do arquivo gravado em /uploads
    #[schema(example = "3f2c9a0e6b1d4c7e8a9b0c1d2e3f4a5b-mercado.jpg")]
    pub image: String,
    #[schema(example = "Mercado do Zé")]
    pub name: String,
    #[schema(example = "contato@mercadodoze.com.br")]
    pub email: String,
    #[schema(example = "38999998888")]
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    #[schema(example = "Diamantina")]
    pub city: String,
    #[schema(example = "MG")]
    pub uf: String,
    pub created_at: DateTime<Utc>,
}

// --- Associação ponto <-> item ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PointItem {
    pub point_id: i32,
    pub item_id: i32,
}

/// Dados já validados para inserir um ponto e suas associações.
#[derive(Debug, Clone)]
pub struct NewPoint {
    pub image: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    pub item_ids: Vec<i32>,
}

// Ponto com a URL absoluta da imagem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PointView {
    #[serde(flatten)]
    pub point: Point,
    #[schema(example = "http://localhost:3333/uploads/3f2c9a0e6b1d4c7e8a9b0c1d2e3f4a5b-mercado.jpg")]
    pub image_url: String,
}

impl PointView {
    pub fn from_point(point: Point, config: &Config) -> Self {
        Self {
            image_url: config.image_url(&point.image),
            point,
        }
    }
}

// Resposta de GET /points/{id}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PointDetail {
    pub point: PointView,
    pub itens: Vec<ItemTitle>,
}

/// Filtro da listagem. Os três campos são obrigatórios.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFilter {
    pub city: String,
    pub uf: String,
    pub item_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ItemIdsError {
    #[error("nenhum item informado")]
    Empty,
    #[error("id de item inválido: '{0}'")]
    Malformed(String),
}

/// Lê a lista "1, 2,6" de ids de itens.
///
/// Cada id precisa ser um inteiro positivo. Repetições são descartadas
/// mantendo a ordem da primeira ocorrência.
pub fn parse_item_ids(raw: &str) -> Result<Vec<i32>, ItemIdsError> {
    if raw.trim().is_empty() {
        return Err(ItemIdsError::Empty);
    }

    let mut ids = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        let id = part
            .parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| ItemIdsError::Malformed(part.to_string()))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
