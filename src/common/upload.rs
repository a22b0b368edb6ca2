// src/common/upload.rs

use std::path::{Path, PathBuf};

use crate::common::error::AppError;

// Onde ficam as imagens enviadas para os pontos. Servidas em /uploads.
#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Valida que o conteúdo é uma imagem e grava com nome único.
    ///
    /// O arquivo só fica no disco se o chamador confirmar com
    /// [`StoredUpload::keep`]; qualquer outro caminho (erro, requisição
    /// cancelada) apaga a imagem quando o guarda é descartado.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<StoredUpload, AppError> {
        if image::guess_format(bytes).is_err() {
            return Err(AppError::InvalidImage);
        }

        let file_name = stored_file_name(original_name);
        let path = self.dir.join(&file_name);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(file = %file_name, size = bytes.len(), "Imagem gravada");
        Ok(StoredUpload {
            path,
            file_name,
            kept: false,
        })
    }
}

// Imagem gravada cujo ponto ainda não foi confirmado no banco.
#[derive(Debug)]
pub struct StoredUpload {
    path: PathBuf,
    file_name: String,
    kept: bool,
}

impl StoredUpload {
    /// Nome gravado (o que vai para a coluna `image`).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn keep(mut self) -> String {
        self.kept = true;
        std::mem::take(&mut self.file_name)
    }
}

impl Drop for StoredUpload {
    fn drop(&mut self) {
        if self.kept {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(file = %self.file_name, "Imagem órfã removida"),
            Err(e) => {
                tracing::warn!(file = %self.file_name, error = %e, "Falha ao remover imagem órfã")
            }
        }
    }
}

/// `<uuid>-<nome original saneado>`
pub fn stored_file_name(original_name: &str) -> String {
    format!("{}-{}", uuid::Uuid::new_v4().simple(), sanitize_file_name(original_name))
}

// Só o último componente do caminho, com caracteres seguros para URL.
fn sanitize_file_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}
