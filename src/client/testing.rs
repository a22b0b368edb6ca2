// src/client/testing.rs
//
// Dublês das traits do cliente para os testes de unidade.

use std::sync::Mutex;

use chrono::Utc;

use crate::{
    client::{
        api::{ImageUpload, PointSubmission, PointsApi},
        error::ClientError,
        ibge::LocalityApi,
        location::{Coordinates, LocationError, LocationProvider, PermissionStatus},
    },
    models::{
        item::{ItemTitle, ItemView},
        point::{Point, PointDetail, PointFilter, PointView},
    },
};

pub fn point_view(id: i32, city: &str, uf: &str) -> PointView {
    PointView {
        point: Point {
            id,
            image: format!("{id}-foto.png"),
            name: format!("Ponto {id}"),
            email: format!("ponto{id}@ecoleta.com"),
            whatsapp: "38999990000".into(),
            latitude: -18.24,
            longitude: -43.6,
            city: city.into(),
            uf: uf.into(),
            created_at: Utc::now(),
        },
        image_url: format!("http://localhost:3333/uploads/{id}-foto.png"),
    }
}

pub fn catalog() -> Vec<ItemView> {
    [(1, "Lâmpadas"), (2, "Pilhas e Baterias"), (6, "Óleo de Cozinha")]
        .into_iter()
        .map(|(id, title)| ItemView {
            id,
            title: title.into(),
            image_url: format!("http://localhost:3333/uploads/{id}.svg"),
        })
        .collect()
}

#[derive(Default)]
pub struct FakeApi {
    pub points: Vec<PointView>,
    pub fail_create: bool,
    pub fail_list: bool,
    pub filters: Mutex<Vec<PointFilter>>,
    pub created: Mutex<Vec<PointSubmission>>,
}

impl FakeApi {
    pub fn with_points(points: Vec<PointView>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    pub fn filters(&self) -> Vec<PointFilter> {
        self.filters.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<PointSubmission> {
        self.created.lock().unwrap().clone()
    }
}

fn api_error(status: u16, reason: &str) -> ClientError {
    ClientError::Api {
        status,
        reason: Some(reason.into()),
        message: reason.into(),
    }
}

impl PointsApi for FakeApi {
    async fn list_items(&self) -> Result<Vec<ItemView>, ClientError> {
        Ok(catalog())
    }

    async fn list_points(&self, filter: &PointFilter) -> Result<Vec<PointView>, ClientError> {
        self.filters.lock().unwrap().push(filter.clone());
        if self.fail_list {
            return Err(api_error(500, "internal_error"));
        }
        Ok(self
            .points
            .iter()
            .filter(|p| p.point.city == filter.city && p.point.uf == filter.uf)
            .cloned()
            .collect())
    }

    async fn get_point(&self, point_id: i32) -> Result<PointDetail, ClientError> {
        self.points
            .iter()
            .find(|p| p.point.id == point_id)
            .map(|p| PointDetail {
                point: p.clone(),
                itens: vec![ItemTitle {
                    title: "Lâmpadas".into(),
                }],
            })
            .ok_or(ClientError::NotFound)
    }

    async fn create_point(
        &self,
        point: &PointSubmission,
        _image: &ImageUpload,
    ) -> Result<PointView, ClientError> {
        if self.fail_create {
            return Err(api_error(500, "internal_error"));
        }
        self.created.lock().unwrap().push(point.clone());
        Ok(point_view(99, &point.city, &point.uf))
    }
}

pub struct FakeLocalities;

impl LocalityApi for FakeLocalities {
    async fn states(&self) -> Result<Vec<String>, ClientError> {
        Ok(vec!["MG".into(), "SP".into()])
    }

    async fn cities(&self, uf: &str) -> Result<Vec<String>, ClientError> {
        match uf {
            "MG" => Ok(vec!["Belo Horizonte".into(), "Diamantina".into()]),
            "SP" => Ok(vec!["Campinas".into()]),
            _ => Err(ClientError::NotFound),
        }
    }
}

/// Responde as permissões na ordem dada; depois da lista, concede.
pub struct FakeLocation {
    answers: Mutex<Vec<PermissionStatus>>,
    pub position_reads: Mutex<u32>,
}

impl FakeLocation {
    pub fn answering(answers: &[PermissionStatus]) -> Self {
        let mut answers = answers.to_vec();
        answers.reverse();
        Self {
            answers: Mutex::new(answers),
            position_reads: Mutex::new(0),
        }
    }

    pub fn reads(&self) -> u32 {
        *self.position_reads.lock().unwrap()
    }
}

impl LocationProvider for FakeLocation {
    async fn request_permission(&self) -> PermissionStatus {
        self.answers
            .lock()
            .unwrap()
            .pop()
            .unwrap_or(PermissionStatus::Granted)
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        *self.position_reads.lock().unwrap() += 1;
        Ok(Coordinates {
            latitude: -18.2494,
            longitude: -43.6005,
        })
    }
}
