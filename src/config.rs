// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    common::{i18n::I18nStore, upload::UploadStore},
    db::{ItemRepository, PointRepository},
    services::{ItemService, PointService},
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3333;
const DEFAULT_PUBLIC_URL: &str = "http://localhost:3333";
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Configuração resolvida uma única vez na inicialização.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Base das URLs de imagem devolvidas aos clientes (sem `/` no final).
    pub public_url: String,
    pub uploads_dir: PathBuf,
    pub db_max_connections: u32,
    /// Vazio = qualquer origem.
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado de `from_env` para os testes não mexerem no ambiente do processo.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT inválida: '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: '{raw}'"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("MAX_UPLOAD_BYTES inválido: '{raw}'"))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let public_url = lookup("PUBLIC_URL")
            .unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            public_url,
            uploads_dir: lookup("UPLOADS_DIR")
                .unwrap_or_else(|| DEFAULT_UPLOADS_DIR.to_string())
                .into(),
            db_max_connections,
            cors_origins,
            max_upload_bytes,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL absoluta de um arquivo em /uploads.
    pub fn image_url(&self, image: &str) -> String {
        format!("{}/uploads/{}", self.public_url, image)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub i18n_store: I18nStore,
    pub uploads: UploadStore,
    pub item_service: ItemService,
    pub point_service: PointService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::from_pool(db_pool, config)
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, config: Config) -> anyhow::Result<Self> {
        let item_repo = ItemRepository::new(db_pool.clone());
        let point_repo = PointRepository::new(db_pool.clone());

        Ok(Self {
            item_service: ItemService::new(item_repo),
            point_service: PointService::new(point_repo, db_pool.clone()),
            i18n_store: I18nStore::load()?,
            uploads: UploadStore::new(config.uploads_dir.clone()),
            config: Arc::new(config),
            db_pool,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db")])).unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:3333");
        assert_eq!(config.public_url, "http://localhost:3333");
        assert_eq!(config.uploads_dir, PathBuf::from("uploads"));
        assert_eq!(config.db_max_connections, 5);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("PORT", "http"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn image_url_joins_public_url_and_file_name() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("PUBLIC_URL", "http://192.168.100.77:3333/"),
            ("CORS_ORIGINS", "http://localhost:3000, ,http://ecoleta.app"),
        ]))
        .unwrap();

        assert_eq!(
            config.image_url("oleo.svg"),
            "http://192.168.100.77:3333/uploads/oleo.svg"
        );
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "http://ecoleta.app"]
        );
    }
}
