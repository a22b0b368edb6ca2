// src/client/api.rs

use std::future::Future;

use reqwest::{
    Response, StatusCode,
    multipart::{Form, Part},
};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    client::error::ClientError,
    models::{
        item::ItemView,
        point::{PointDetail, PointFilter, PointView},
    },
};

/// Campos enviados em POST /points (a imagem vai à parte).
#[derive(Debug, Clone, PartialEq)]
pub struct PointSubmission {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    pub item_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// "1,2,6", o formato que a API espera em `itens`.
pub fn join_item_ids(item_ids: &[i32]) -> String {
    item_ids
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Operações da API do Ecoleta usadas pelos clientes.
pub trait PointsApi {
    fn list_items(&self) -> impl Future<Output = Result<Vec<ItemView>, ClientError>> + Send;

    fn list_points(
        &self,
        filter: &PointFilter,
    ) -> impl Future<Output = Result<Vec<PointView>, ClientError>> + Send;

    fn get_point(
        &self,
        point_id: i32,
    ) -> impl Future<Output = Result<PointDetail, ClientError>> + Send;

    fn create_point(
        &self,
        point: &PointSubmission,
        image: &ImageUpload,
    ) -> impl Future<Output = Result<PointView, ClientError>> + Send;
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    reason: Option<String>,
}

// Cliente HTTP da API (reqwest)
#[derive(Debug, Clone)]
pub struct EcoletaClient {
    http: reqwest::Client,
    base_url: String,
}

impl EcoletaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            reason: body.reason,
            message: body.error.unwrap_or_else(|| status.to_string()),
        })
    }
}

impl PointsApi for EcoletaClient {
    async fn list_items(&self) -> Result<Vec<ItemView>, ClientError> {
        let response = self.http.get(self.url("itens")).send().await?;
        Self::decode(response).await
    }

    async fn list_points(&self, filter: &PointFilter) -> Result<Vec<PointView>, ClientError> {
        let response = self
            .http
            .get(self.url("points"))
            .query(&[
                ("city", filter.city.as_str()),
                ("uf", filter.uf.as_str()),
                ("itens", join_item_ids(&filter.item_ids).as_str()),
            ])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_point(&self, point_id: i32) -> Result<PointDetail, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("points/{point_id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_point(
        &self,
        point: &PointSubmission,
        image: &ImageUpload,
    ) -> Result<PointView, ClientError> {
        let image_part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;

        let form = Form::new()
            .text("name", point.name.clone())
            .text("email", point.email.clone())
            .text("whatsapp", point.whatsapp.clone())
            .text("latitude", point.latitude.to_string())
            .text("longitude", point.longitude.to_string())
            .text("city", point.city.clone())
            .text("uf", point.uf.clone())
            .text("itens", join_item_ids(&point.item_ids))
            .part("image", image_part);

        let response = self
            .http
            .post(self.url("points"))
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }
}
