// src/client/registration.rs

use crate::{
    client::{
        api::{ImageUpload, PointSubmission, PointsApi},
        error::ClientError,
        ibge::LocalityApi,
        location::{Coordinates, LocationError, LocationProvider, LocationState},
        selection::ItemSelection,
    },
    models::{item::ItemView, point::PointView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    /// Catálogo e UFs carregados; usuário preenchendo.
    Ready,
    /// Ponto criado com este id. A tela volta para a home.
    Submitted(i32),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
}

/// Estado da tela de cadastro de ponto (web).
pub struct RegistrationForm<A, L> {
    api: A,
    localities: L,
    phase: FormPhase,
    items: Vec<ItemView>,
    states: Vec<String>,
    cities: Vec<String>,
    selected_uf: Option<String>,
    selected_city: Option<String>,
    contact: ContactFields,
    initial_position: LocationState,
    selected_position: Option<Coordinates>,
    selection: ItemSelection,
    image: Option<ImageUpload>,
}

impl<A, L> RegistrationForm<A, L>
where
    A: PointsApi,
    L: LocalityApi,
{
    pub fn new(api: A, localities: L) -> Self {
        Self {
            api,
            localities,
            phase: FormPhase::Idle,
            items: Vec::new(),
            states: Vec::new(),
            cities: Vec::new(),
            selected_uf: None,
            selected_city: None,
            contact: ContactFields::default(),
            initial_position: LocationState::Unknown,
            selected_position: None,
            selection: ItemSelection::new(),
            image: None,
        }
    }

    /// Busca o catálogo de itens e a lista de UFs (em paralelo).
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let (items, states) = tokio::join!(self.api.list_items(), self.localities.states());
        self.items = items?;
        self.states = states?;
        self.phase = FormPhase::Ready;
        Ok(())
    }

    /// Centro inicial do mapa. Sem permissão, o mapa abre sem posição.
    pub async fn locate<P: LocationProvider>(&mut self, provider: &P) -> Result<(), LocationError> {
        self.initial_position.resolve(provider).await
    }

    /// Troca a UF e carrega suas cidades; a cidade escolhida antes é descartada.
    pub async fn select_uf(&mut self, uf: &str) -> Result<(), ClientError> {
        self.selected_uf = Some(uf.to_string());
        self.selected_city = None;
        self.cities.clear();

        self.cities = self.localities.cities(uf).await?;
        Ok(())
    }

    pub fn select_city(&mut self, city: &str) {
        self.selected_city = Some(city.to_string());
    }

    pub fn contact_mut(&mut self) -> &mut ContactFields {
        &mut self.contact
    }

    // Clique no mapa marca a posição do ponto
    pub fn map_click(&mut self, latitude: f64, longitude: f64) {
        self.selected_position = Some(Coordinates {
            latitude,
            longitude,
        });
    }

    pub fn toggle_item(&mut self, item_id: i32) -> bool {
        self.selection.toggle(item_id)
    }

    pub fn attach_image(&mut self, image: ImageUpload) {
        self.image = Some(image);
    }

    /// Monta o envio, ou aponta o primeiro campo que falta.
    pub fn submission(&self) -> Result<PointSubmission, ClientError> {
        fn filled(value: &str, field: &'static str) -> Result<String, ClientError> {
            let value = value.trim();
            if value.is_empty() {
                Err(ClientError::Incomplete(field))
            } else {
                Ok(value.to_string())
            }
        }

        let name = filled(&self.contact.name, "name")?;
        let email = filled(&self.contact.email, "email")?;
        let whatsapp = filled(&self.contact.whatsapp, "whatsapp")?;
        let uf = filled(self.selected_uf.as_deref().unwrap_or_default(), "uf")?;
        let city = filled(self.selected_city.as_deref().unwrap_or_default(), "city")?;
        let position = self
            .selected_position
            .ok_or(ClientError::Incomplete("position"))?;
        if self.selection.is_empty() {
            return Err(ClientError::Incomplete("itens"));
        }

        Ok(PointSubmission {
            name,
            email,
            whatsapp,
            latitude: position.latitude,
            longitude: position.longitude,
            city,
            uf,
            item_ids: self.selection.ids().to_vec(),
        })
    }

    /// Envia o cadastro.
    ///
    /// Só em caso de sucesso a fase muda para `Submitted`; em qualquer falha o
    /// formulário fica como estava para o usuário corrigir ou tentar de novo.
    pub async fn submit(&mut self) -> Result<PointView, ClientError> {
        let submission = self.submission()?;
        let image = self.image.as_ref().ok_or(ClientError::Incomplete("image"))?;

        match self.api.create_point(&submission, image).await {
            Ok(point) => {
                tracing::info!(point_id = point.point.id, "Ponto de coleta cadastrado");
                self.phase = FormPhase::Submitted(point.point.id);
                Ok(point)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Falha ao cadastrar ponto de coleta");
                Err(e)
            }
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn items(&self) -> &[ItemView] {
        &self.items
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn selection(&self) -> &ItemSelection {
        &self.selection
    }

    pub fn selected_position(&self) -> Option<Coordinates> {
        self.selected_position
    }

    pub fn initial_position(&self) -> LocationState {
        self.initial_position
    }
}
