// src/client/ibge.rs

use std::future::Future;

use serde::Deserialize;

use crate::client::error::ClientError;

pub const IBGE_LOCALITIES_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

/// Fonte das UFs e cidades usadas no cadastro.
pub trait LocalityApi {
    fn states(&self) -> impl Future<Output = Result<Vec<String>, ClientError>> + Send;

    fn cities(&self, uf: &str) -> impl Future<Output = Result<Vec<String>, ClientError>> + Send;
}

#[derive(Debug, Deserialize)]
struct IbgeState {
    sigla: String,
}

#[derive(Debug, Deserialize)]
struct IbgeCity {
    nome: String,
}

// Siglas em ordem alfabética
fn state_abbreviations(states: Vec<IbgeState>) -> Vec<String> {
    let mut siglas: Vec<String> = states.into_iter().map(|s| s.sigla).collect();
    siglas.sort();
    siglas
}

fn city_names(cities: Vec<IbgeCity>) -> Vec<String> {
    cities.into_iter().map(|c| c.nome).collect()
}

#[derive(Debug, Clone)]
pub struct IbgeClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for IbgeClient {
    fn default() -> Self {
        Self::with_base_url(IBGE_LOCALITIES_URL)
    }
}

impl IbgeClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, path))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

impl LocalityApi for IbgeClient {
    async fn states(&self) -> Result<Vec<String>, ClientError> {
        let states: Vec<IbgeState> = self.fetch("estados").await?;
        Ok(state_abbreviations(states))
    }

    async fn cities(&self, uf: &str) -> Result<Vec<String>, ClientError> {
        let cities: Vec<IbgeCity> = self.fetch(&format!("estados/{uf}/municipios")).await?;
        Ok(city_names(cities))
    }
}
