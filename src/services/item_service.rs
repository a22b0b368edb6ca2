// src/services/item_service.rs

use crate::{common::error::AppError, db::ItemRepository, models::item::Item};

#[derive(Clone)]
pub struct ItemService {
    repo: ItemRepository,
}

impl ItemService {
    pub fn new(repo: ItemRepository) -> Self {
        Self { repo }
    }

    pub async fn get_all_items(&self) -> Result<Vec<Item>, AppError> {
        self.repo.get_all_items().await
    }
}
