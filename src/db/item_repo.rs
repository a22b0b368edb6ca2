// src/db/item_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::item::Item};

#[derive(Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Catálogo é só leitura, então usa a pool principal.
    pub async fn get_all_items(&self) -> Result<Vec<Item>, AppError> {
        let items = sqlx::query_as::<_, Item>("SELECT id, title, image FROM items ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }
}
