// src/client/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Falha de comunicação: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Recurso não encontrado")]
    NotFound,

    // Erro devolvido pela API (corpo `{ error, reason }`)
    #[error("API respondeu {status}: {message}")]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    // Validação local antes de enviar o formulário
    #[error("Formulário incompleto: {0}")]
    Incomplete(&'static str),
}
