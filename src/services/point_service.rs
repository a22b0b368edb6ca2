// src/services/point_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::PointRepository,
    models::{
        item::ItemTitle,
        point::{NewPoint, Point, PointFilter},
    },
};

#[derive(Clone)]
pub struct PointService {
    repo: PointRepository,
    pool: PgPool,
}

impl PointService {
    pub fn new(repo: PointRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // --- CREATE POINT ---
    // Ponto + associações numa transação só. Se qualquer passo falhar, o `tx`
    // é descartado sem commit e o sqlx faz o ROLLBACK.
    pub async fn create_point(&self, new_point: &NewPoint) -> Result<Point, AppError> {
        let mut tx = self.pool.begin().await?;

        let point = self.repo.insert_point(&mut *tx, new_point).await?;

        let linked = self
            .repo
            .insert_point_items(&mut *tx, point.id, &new_point.item_ids)
            .await?;

        tx.commit().await?;

        tracing::info!(point_id = point.id, items = linked, "Ponto de coleta criado");
        Ok(point)
    }

    // --- SHOW POINT ---
    pub async fn get_point(&self, point_id: i32) -> Result<(Point, Vec<ItemTitle>), AppError> {
        let point = self
            .repo
            .find_by_id(point_id)
            .await?
            .ok_or(AppError::PointNotFound(point_id))?;

        let titles = self.repo.get_item_titles(point_id).await?;
        Ok((point, titles))
    }

    // --- LIST POINTS ---
    pub async fn get_filtered_points(&self, filter: &PointFilter) -> Result<Vec<Point>, AppError> {
        self.repo.get_filtered(filter).await
    }
}
