// src/client/selection.rs

use crate::client::api::join_item_ids;

/// Itens marcados pelo usuário, na ordem em que foram marcados.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSelection {
    ids: Vec<i32>,
}

impl ItemSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marca se ausente, desmarca se presente.
    /// Retorna `true` quando o item ficou marcado.
    pub fn toggle(&mut self, item_id: i32) -> bool {
        if let Some(pos) = self.ids.iter().position(|id| *id == item_id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(item_id);
            true
        }
    }

    pub fn contains(&self, item_id: i32) -> bool {
        self.ids.contains(&item_id)
    }

    pub fn ids(&self) -> &[i32] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn to_query(&self) -> String {
        join_item_ids(&self.ids)
    }
}
