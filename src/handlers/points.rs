// src/handlers/points.rs

use axum::{
    Json,
    extract::{
        Multipart, Path, Query, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::point::{
        ItemIdsError, NewPoint, PointDetail, PointFilter, PointView, parse_item_ids,
    },
};

// ---
// Validações customizadas
// ---
fn validate_latitude(value: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&value) {
        let mut err = ValidationError::new("range");
        err.message = Some("A latitude deve estar entre -90 e 90.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_longitude(value: f64) -> Result<(), ValidationError> {
    if !(-180.0..=180.0).contains(&value) {
        let mut err = ValidationError::new("range");
        err.message = Some("A longitude deve estar entre -180 e 180.".into());
        return Err(err);
    }
    Ok(())
}

// Sigla como no IBGE: duas letras maiúsculas ("MG", "SP").
fn validate_uf(value: &str) -> Result<(), ValidationError> {
    if value.len() != 2 || !value.chars().all(|c| c.is_ascii_uppercase()) {
        let mut err = ValidationError::new("uf");
        err.message = Some("A UF deve ter 2 letras maiúsculas.".into());
        return Err(err);
    }
    Ok(())
}

fn item_ids_error(error: ItemIdsError) -> ValidationError {
    let mut err = match error {
        ItemIdsError::Empty => ValidationError::new("required"),
        ItemIdsError::Malformed(_) => ValidationError::new("item_id"),
    };
    err.message = Some(format!("Lista de itens inválida: {error}.").into());
    err
}

// Política: ponto sem nenhum item é rejeitado.
fn validate_item_ids(value: &str) -> Result<(), ValidationError> {
    parse_item_ids(value).map(|_| ()).map_err(item_ids_error)
}

// Números não finitos ("NaN", "inf") contam como ausentes.
fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

// ---
// Payload: CreatePoint (campos de texto do formulário multipart)
// ---
#[derive(Debug, Default, Validate, ToSchema)]
pub struct CreatePointPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Mercado do Zé")]
    pub name: String,

    #[validate(email(message = "Informe um e-mail válido."))]
    #[schema(example = "contato@mercadodoze.com.br")]
    pub email: String,

    #[validate(length(min = 1, message = "O WhatsApp é obrigatório."))]
    #[schema(example = "38999998888")]
    pub whatsapp: String,

    #[validate(
        required(message = "Latitude ausente ou inválida."),
        custom(function = "validate_latitude")
    )]
    pub latitude: Option<f64>,

    #[validate(
        required(message = "Longitude ausente ou inválida."),
        custom(function = "validate_longitude")
    )]
    pub longitude: Option<f64>,

    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    #[schema(example = "Diamantina")]
    pub city: String,

    #[validate(custom(function = "validate_uf"))]
    #[schema(example = "MG")]
    pub uf: String,

    /// Ids dos itens separados por vírgula
    #[validate(custom(function = "validate_item_ids"))]
    #[schema(example = "1,6")]
    pub itens: String,
}

impl CreatePointPayload {
    fn set_field(&mut self, name: &str, value: &str) {
        match name {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "whatsapp" => self.whatsapp = value.to_string(),
            "latitude" => self.latitude = parse_coordinate(value),
            "longitude" => self.longitude = parse_coordinate(value),
            "city" => self.city = value.to_string(),
            "uf" => self.uf = value.to_string(),
            "itens" => self.itens = value.to_string(),
            _ => {} // campos desconhecidos são ignorados
        }
    }

    /// Só deve ser chamado depois de `validate()`.
    fn into_new_point(self, image: String) -> Result<NewPoint, AppError> {
        let item_ids = parse_item_ids(&self.itens).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("itens", item_ids_error(e));
            AppError::ValidationError(errors)
        })?;

        Ok(NewPoint {
            image,
            name: self.name,
            email: self.email,
            whatsapp: self.whatsapp,
            // validate() garante Some
            latitude: self.latitude.unwrap_or_default(),
            longitude: self.longitude.unwrap_or_default(),
            city: self.city,
            uf: self.uf,
            item_ids,
        })
    }
}

struct UploadedImage {
    file_name: String,
    bytes: Vec<u8>,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::InvalidMultipart(e.body_text())
    }
}

async fn read_point_form(
    mut multipart: Multipart,
) -> Result<(CreatePointPayload, Option<UploadedImage>), AppError> {
    let mut payload = CreatePointPayload::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let file_name = field.file_name().unwrap_or("image").to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            // Input de arquivo vazio chega como parte sem conteúdo
            if !bytes.is_empty() {
                image = Some(UploadedImage {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            payload.set_field(&name, value.trim());
        }
    }

    Ok((payload, image))
}

async fn register_point(
    app_state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<PointView, AppError> {
    let multipart = multipart.map_err(|e| AppError::InvalidMultipart(e.body_text()))?;
    let (payload, image) = read_point_form(multipart).await?;

    payload.validate()?;
    let image = image.ok_or(AppError::MissingImage)?;

    // Até o `keep()`, qualquer saída (erro ou cancelamento) apaga a imagem.
    let upload = app_state.uploads.save(&image.file_name, &image.bytes).await?;
    let new_point = payload.into_new_point(upload.file_name().to_string())?;

    let point = app_state
        .point_service
        .create_point(&new_point)
        .await
        .inspect_err(|_| {
            tracing::warn!(file = %upload.file_name(), "Criação do ponto falhou, transação desfeita");
        })?;

    upload.keep();
    Ok(PointView::from_point(point, &app_state.config))
}

// POST /points
#[utoipa::path(
    post,
    path = "/points",
    tag = "Points",
    request_body(
        content = CreatePointPayload,
        content_type = "multipart/form-data",
        description = "Campos do ponto mais o arquivo de imagem no campo `image`"
    ),
    responses(
        (status = 201, description = "Ponto criado", body = PointView),
        (status = 400, description = "Campos inválidos, imagem ausente ou inválida"),
        (status = 413, description = "Imagem maior que o limite"),
        (status = 500, description = "Falha no banco; nada foi gravado")
    )
)]
pub async fn create_point(
    State(app_state): State<AppState>,
    locale: Locale,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let point = register_point(&app_state, multipart)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(point)))
}

// GET /points/{id}
#[utoipa::path(
    get,
    path = "/points/{id}",
    tag = "Points",
    params(
        ("id" = i32, Path, description = "Id do ponto de coleta")
    ),
    responses(
        (status = 200, description = "Ponto e títulos dos itens aceitos", body = PointDetail),
        (status = 400, description = "Id não numérico"),
        (status = 404, description = "Ponto não encontrado")
    )
)]
pub async fn get_point(
    State(app_state): State<AppState>,
    locale: Locale,
    point_id: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(point_id) = point_id.map_err(|e| {
        AppError::InvalidPointId(e.body_text()).to_api_error(&locale, &app_state.i18n_store)
    })?;

    let (point, itens) = app_state
        .point_service
        .get_point(point_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let detail = PointDetail {
        point: PointView::from_point(point, &app_state.config),
        itens,
    };

    Ok((StatusCode::OK, Json(detail)))
}

// ---
// Query: listagem filtrada
// ---
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PointsQuery {
    /// Cidade (comparação exata)
    #[param(example = "Diamantina")]
    pub city: Option<String>,
    /// UF (comparação exata)
    #[param(example = "MG")]
    pub uf: Option<String>,
    /// Ids dos itens separados por vírgula
    #[param(example = "1,6")]
    pub itens: Option<String>,
}

fn required_filter(value: Option<String>, name: &'static str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(AppError::MissingFilter(name))
}

impl PointsQuery {
    pub fn into_filter(self) -> Result<PointFilter, AppError> {
        let city = required_filter(self.city, "city")?;
        let uf = required_filter(self.uf, "uf")?;
        let raw_items = required_filter(self.itens, "itens")?;

        let item_ids = parse_item_ids(&raw_items).map_err(|e| match e {
            ItemIdsError::Empty => AppError::MissingFilter("itens"),
            ItemIdsError::Malformed(part) => AppError::InvalidFilter(part),
        })?;

        Ok(PointFilter { city, uf, item_ids })
    }
}

// GET /points?city=&uf=&itens=
#[utoipa::path(
    get,
    path = "/points",
    tag = "Points",
    params(PointsQuery),
    responses(
        (status = 200, description = "Pontos que aceitam ao menos um dos itens", body = Vec<PointView>),
        (status = 400, description = "Filtro ausente ou inválido")
    )
)]
pub async fn list_points(
    State(app_state): State<AppState>,
    locale: Locale,
    query: Result<Query<PointsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query
        .map_err(|e| AppError::InvalidFilter(e.body_text()))
        .and_then(|Query(query)| query.into_filter())
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let points = app_state
        .point_service
        .get_filtered_points(&filter)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let serialized: Vec<PointView> = points
        .into_iter()
        .map(|point| PointView::from_point(point, &app_state.config))
        .collect();

    Ok((StatusCode::OK, Json(serialized)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> CreatePointPayload {
        let mut payload = CreatePointPayload::default();
        for (name, value) in [
            ("name", "Mercado do Zé"),
            ("email", "ze@mercado.com"),
            ("whatsapp", "38999998888"),
            ("latitude", "-18.2494"),
            ("longitude", "-43.6005"),
            ("city", "Diamantina"),
            ("uf", "MG"),
            ("itens", "1, 6"),
        ] {
            payload.set_field(name, value);
        }
        payload
    }

    #[test]
    fn complete_payload_is_valid() {
        let payload = valid_payload();
        assert!(payload.validate().is_ok());

        let new_point = payload.into_new_point("abc-foto.png".into()).unwrap();
        assert_eq!(new_point.item_ids, vec![1, 6]);
        assert_eq!(new_point.latitude, -18.2494);
        assert_eq!(new_point.image, "abc-foto.png");
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let mut payload = valid_payload();
        payload.set_field("itens", "");

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("itens"));
    }

    #[test]
    fn malformed_item_list_is_rejected() {
        let mut payload = valid_payload();
        payload.set_field("itens", "1,papel");

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("itens"));
    }

    #[test]
    fn coordinates_out_of_range_or_unparsable_are_rejected() {
        let mut payload = valid_payload();
        payload.set_field("latitude", "91");
        payload.set_field("longitude", "NaN");

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("latitude"));
        assert!(fields.contains_key("longitude"));
    }

    #[test]
    fn uf_must_have_two_letters_and_email_must_be_valid() {
        let mut payload = valid_payload();
        payload.set_field("uf", "MGS");
        payload.set_field("email", "sem-arroba");

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("uf"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn lowercase_uf_is_rejected() {
        for uf in ["mg", "Mg", "M1"] {
            let mut payload = valid_payload();
            payload.set_field("uf", uf);

            let errors = payload.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("uf"), "{uf}");
        }
    }

    #[test]
    fn filter_requires_all_three_parameters() {
        let query = PointsQuery {
            city: Some("Diamantina".into()),
            uf: None,
            itens: Some("1".into()),
        };
        assert!(matches!(query.into_filter(), Err(AppError::MissingFilter("uf"))));

        let query = PointsQuery {
            city: Some("  ".into()),
            uf: Some("MG".into()),
            itens: Some("1".into()),
        };
        assert!(matches!(query.into_filter(), Err(AppError::MissingFilter("city"))));

        let query = PointsQuery {
            city: Some("Diamantina".into()),
            uf: Some("MG".into()),
            itens: None,
        };
        assert!(matches!(query.into_filter(), Err(AppError::MissingFilter("itens"))));
    }

    #[test]
    fn filter_keeps_city_and_uf_verbatim() {
        let query = PointsQuery {
            city: Some("Diamantina".into()),
            uf: Some("MG".into()),
            itens: Some("1,6".into()),
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(
            filter,
            PointFilter {
                city: "Diamantina".into(),
                uf: "MG".into(),
                item_ids: vec![1, 6],
            }
        );

        let query = PointsQuery {
            city: Some("Diamantina".into()),
            uf: Some("MG".into()),
            itens: Some("1,x".into()),
        };
        assert!(matches!(query.into_filter(), Err(AppError::InvalidFilter(p)) if p == "x"));
    }
}
