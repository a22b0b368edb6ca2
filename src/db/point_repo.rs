// src/db/point_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{
        item::ItemTitle,
        point::{NewPoint, Point, PointFilter},
    },
};

#[derive(Clone)]
pub struct PointRepository {
    pool: PgPool,
}

impl PointRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura"
    // ---

    pub async fn find_by_id(&self, point_id: i32) -> Result<Option<Point>, AppError> {
        let point = sqlx::query_as::<_, Point>("SELECT * FROM points WHERE id = $1")
            .bind(point_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(point)
    }

    /// Títulos dos itens aceitos por um ponto, na ordem do catálogo.
    pub async fn get_item_titles(&self, point_id: i32) -> Result<Vec<ItemTitle>, AppError> {
        let titles = sqlx::query_as::<_, ItemTitle>(
            r#"
            SELECT items.title
            FROM items
            JOIN point_items ON items.id = point_items.item_id
            WHERE point_items.point_id = $1
            ORDER BY items.id ASC
            "#,
        )
        .bind(point_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(titles)
    }

    /// Pontos da cidade/UF (igualdade exata) que aceitam ao menos um dos itens.
    pub async fn get_filtered(&self, filter: &PointFilter) -> Result<Vec<Point>, AppError> {
        // DISTINCT: um ponto com vários itens do filtro aparece uma vez só
        let points = sqlx::query_as::<_, Point>(
            r#"
            SELECT DISTINCT points.*
            FROM points
            JOIN point_items ON points.id = point_items.point_id
            WHERE point_items.item_id = ANY($1)
              AND points.city = $2
              AND points.uf = $3
            ORDER BY points.id ASC
            "#,
        )
        .bind(&filter.item_ids)
        .bind(&filter.city)
        .bind(&filter.uf)
        .fetch_all(&self.pool)
        .await?;
        Ok(points)
    }

    // ---
    // Funções de "Escrita" (rodam dentro da transação do serviço)
    // ---

    pub async fn insert_point<'e, E>(&self, executor: E, new_point: &NewPoint) -> Result<Point, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let point = sqlx::query_as::<_, Point>(
            r#"
            INSERT INTO points (image, name, email, whatsapp, latitude, longitude, city, uf)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&new_point.image)
        .bind(&new_point.name)
        .bind(&new_point.email)
        .bind(&new_point.whatsapp)
        .bind(new_point.latitude)
        .bind(new_point.longitude)
        .bind(&new_point.city)
        .bind(&new_point.uf)
        .fetch_one(executor)
        .await?;
        Ok(point)
    }

    /// Insere todas as associações de uma vez (UNNEST do array de ids).
    pub async fn insert_point_items<'e, E>(
        &self,
        executor: E,
        point_id: i32,
        item_ids: &[i32],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO point_items (point_id, item_id)
            SELECT $1, item_id FROM UNNEST($2::int4[]) AS item_id
            "#,
        )
        .bind(point_id)
        .bind(item_ids)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
