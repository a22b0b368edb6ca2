// src/common/error.rs

use std::collections::HashMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erro de domínio. Os serviços e repositórios só conhecem este tipo;
// a tradução para HTTP acontece em `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Filtro obrigatório ausente: {0}")]
    MissingFilter(&'static str),

    #[error("Filtro inválido: {0}")]
    InvalidFilter(String),

    #[error("Id de ponto inválido: {0}")]
    InvalidPointId(String),

    #[error("Ponto {0} não encontrado")]
    PointNotFound(i32),

    #[error("Formulário multipart inválido: {0}")]
    InvalidMultipart(String),

    #[error("Imagem ausente")]
    MissingImage,

    #[error("Arquivo enviado não é uma imagem")]
    InvalidImage,

    #[error("Arquivo enviado excede o limite")]
    PayloadTooLarge,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de E/S: {0}")]
    IoError(#[from] std::io::Error),

    // Qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Status HTTP e código legível por máquina de cada variante.
    pub fn status_and_reason(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::MissingFilter(_) => (StatusCode::BAD_REQUEST, "missing_filter"),
            AppError::InvalidFilter(_) => (StatusCode::BAD_REQUEST, "invalid_filter"),
            AppError::InvalidPointId(_) => (StatusCode::BAD_REQUEST, "invalid_point_id"),
            AppError::PointNotFound(_) => (StatusCode::NOT_FOUND, "point_not_found"),
            AppError::InvalidMultipart(_) => (StatusCode::BAD_REQUEST, "invalid_multipart"),
            AppError::MissingImage => (StatusCode::BAD_REQUEST, "missing_image"),
            AppError::InvalidImage => (StatusCode::BAD_REQUEST, "invalid_image"),
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::DatabaseError(_)
            | AppError::IoError(_)
            | AppError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }

    /// Converte o erro de domínio em resposta HTTP no idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, i18n_store: &I18nStore) -> ApiError {
        let (status, reason) = self.status_and_reason();

        if status.is_server_error() {
            // O detalhe fica só no log; o cliente recebe a mensagem genérica.
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        }

        let details = match &self {
            AppError::ValidationError(errors) => Some(field_messages(errors)),
            _ => None,
        };

        ApiError {
            status,
            reason,
            message: i18n_store.translate(&locale.0, reason),
            details,
        }
    }
}

// Junta as mensagens de cada campo; sem mensagem, usa o código da regra.
fn field_messages(errors: &validator::ValidationErrors) -> HashMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

// Erro já traduzido, pronto para virar resposta.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub reason: &'static str,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({
                "error": self.message,
                "reason": self.reason,
                "details": details,
            }),
            None => json!({
                "error": self.message,
                "reason": self.reason,
            }),
        };
        (self.status, Json(body)).into_response()
    }
}
