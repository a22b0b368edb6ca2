// src/client/location.rs

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Localização indisponível: {0}")]
    Unavailable(String),
}

/// GPS do aparelho ou geolocalização do navegador.
pub trait LocationProvider {
    fn request_permission(&self) -> impl Future<Output = PermissionStatus> + Send;

    fn current_position(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LocationState {
    #[default]
    Unknown,
    /// Permissão negada; a tela mostra o aviso e pode pedir de novo.
    Denied,
    Located(Coordinates),
}

impl LocationState {
    /// Pede permissão e lê a posição uma única vez.
    ///
    /// Negar não é erro: o estado vira `Denied` e uma nova chamada pede a
    /// permissão outra vez. Depois de `Located`, não consulta mais o provedor.
    pub async fn resolve<P: LocationProvider>(&mut self, provider: &P) -> Result<(), LocationError> {
        if matches!(self, LocationState::Located(_)) {
            return Ok(());
        }

        match provider.request_permission().await {
            PermissionStatus::Denied => {
                tracing::debug!("Permissão de localização negada");
                *self = LocationState::Denied;
            }
            PermissionStatus::Granted => {
                let position = provider.current_position().await?;
                *self = LocationState::Located(position);
            }
        }
        Ok(())
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            LocationState::Located(position) => Some(*position),
            _ => None,
        }
    }
}
