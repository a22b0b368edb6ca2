// src/client/browser.rs

use crate::{
    client::{
        api::PointsApi,
        error::ClientError,
        location::{LocationError, LocationProvider, LocationState},
        selection::ItemSelection,
    },
    models::{
        item::ItemView,
        point::{PointDetail, PointFilter, PointView},
    },
};

/// Busca de pontos disparada por uma mudança de filtro.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsRequest {
    pub ticket: u64,
    pub filter: PointFilter,
}

/// Estado da tela de pontos do app mobile: UF/cidade vêm da tela anterior,
/// os itens marcados filtram o que aparece no mapa.
pub struct PointsBrowser<A> {
    api: A,
    uf: String,
    city: String,
    items: Vec<ItemView>,
    selection: ItemSelection,
    points: Vec<PointView>,
    location: LocationState,
    latest_ticket: u64,
}

impl<A: PointsApi> PointsBrowser<A> {
    pub fn new(api: A, uf: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            api,
            uf: uf.into(),
            city: city.into(),
            items: Vec::new(),
            selection: ItemSelection::new(),
            points: Vec::new(),
            location: LocationState::Unknown,
            latest_ticket: 0,
        }
    }

    pub async fn load_items(&mut self) -> Result<(), ClientError> {
        self.items = self.api.list_items().await?;
        Ok(())
    }

    /// Negar a permissão deixa `Denied` (aviso na tela); pode chamar de novo.
    pub async fn locate<P: LocationProvider>(
        &mut self,
        provider: &P,
    ) -> Result<&LocationState, LocationError> {
        self.location.resolve(provider).await?;
        Ok(&self.location)
    }

    /// Começa uma nova busca e invalida as anteriores.
    ///
    /// Sem item marcado não há busca: a API exige o filtro, então a lista
    /// fica vazia e `None` é retornado.
    pub fn begin_refresh(&mut self) -> Option<PointsRequest> {
        self.latest_ticket += 1;

        if self.selection.is_empty() {
            self.points.clear();
            return None;
        }

        Some(PointsRequest {
            ticket: self.latest_ticket,
            filter: PointFilter {
                city: self.city.clone(),
                uf: self.uf.clone(),
                item_ids: self.selection.ids().to_vec(),
            },
        })
    }

    /// Aplica o resultado de uma busca se ela ainda for a mais recente.
    pub fn apply_points(&mut self, ticket: u64, points: Vec<PointView>) -> bool {
        if ticket != self.latest_ticket {
            tracing::debug!(ticket, latest = self.latest_ticket, "Resposta antiga descartada");
            return false;
        }
        self.points = points;
        true
    }

    /// Refaz a busca com o filtro atual. Em falha, a lista exibida não muda.
    pub async fn refresh_points(&mut self) -> Result<(), ClientError> {
        let Some(request) = self.begin_refresh() else {
            return Ok(());
        };

        let points = self.api.list_points(&request.filter).await?;
        self.apply_points(request.ticket, points);
        Ok(())
    }

    pub async fn toggle_item(&mut self, item_id: i32) -> Result<(), ClientError> {
        self.selection.toggle(item_id);
        self.refresh_points().await
    }

    pub async fn detail(&self, point_id: i32) -> Result<PointDetail, ClientError> {
        self.api.get_point(point_id).await
    }

    pub fn items(&self) -> &[ItemView] {
        &self.items
    }

    pub fn points(&self) -> &[PointView] {
        &self.points
    }

    pub fn selection(&self) -> &ItemSelection {
        &self.selection
    }

    pub fn location(&self) -> &LocationState {
        &self.location
    }
}
