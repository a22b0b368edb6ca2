//! Lógica dos clientes do Ecoleta, sem a camada de interface.
//!
//! `registration` reproduz o fluxo web de cadastro de ponto e `browser` a
//! tela mobile de busca. Os dois dependem das traits `PointsApi`,
//! `LocalityApi` e `LocationProvider`, então podem rodar contra os clientes
//! HTTP reais ou contra dublês nos testes.

pub mod api;
pub mod browser;
pub mod error;
pub mod ibge;
pub mod location;
pub mod registration;
pub mod selection;

pub use api::{EcoletaClient, ImageUpload, PointSubmission, PointsApi};
pub use browser::PointsBrowser;
pub use error::ClientError;
pub use ibge::{IbgeClient, LocalityApi};
pub use location::{Coordinates, LocationProvider, LocationState, PermissionStatus};
pub use registration::RegistrationForm;
pub use selection::ItemSelection;

#[cfg(test)]
mod testing;
