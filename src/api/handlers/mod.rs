mod slug;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{error::ApiError, AppState};
use crate::models::*;
use crate::store::StoreError;

pub use slug::{slugify, SlugError};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// ============================================================
// Health / Registry
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Registered field type names, for building type pickers.
pub async fn list_field_types() -> Json<Vec<&'static str>> {
    Json(FieldType::registered())
}

// ============================================================
// Fallbacks
// ============================================================

pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "not found")
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

// ============================================================
// Models
// ============================================================

pub async fn list_models(State(state): State<AppState>) -> Result<Json<Vec<Model>>, ApiError> {
    let service = state.models.lock().await;
    service.list().map(Json).map_err(ApiError::internal)
}

pub async fn get_model(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Model>, ApiError> {
    let service = state.models.lock().await;
    service.get(&slug).map(Json).map_err(ApiError::lookup)
}

pub async fn create_model(
    State(state): State<AppState>,
    payload: Result<Json<CreateModelInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Model>), ApiError> {
    let service = state.models.lock().await;
    let Json(input) = payload?;

    let slug = slugify(&input.name).map_err(ApiError::bad_request)?;
    if service.exists(&slug).map_err(ApiError::internal)? {
        return Err(ApiError::conflict("model already exists"));
    }

    let now = Utc::now();
    let fields = input
        .fields
        .into_iter()
        .map(|f| build_field(new_id(), f.into(), now, now))
        .collect();

    let model = Model {
        id: new_id(),
        name: input.name,
        slug,
        description: input.description,
        fields,
        status: Status::from_str(&input.status),
        schema_version: 1,
    };

    validate_model(&model).map_err(ApiError::bad_request)?;
    // Storage failures past the existence check are still reported as client errors.
    service.create(&model).map_err(ApiError::bad_request)?;

    tracing::info!("Created model {} ({} fields)", model.slug, model.fields.len());
    Ok((StatusCode::CREATED, Json(model)))
}

pub async fn update_model(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    payload: Result<Json<UpdateModelInput>, JsonRejection>,
) -> Result<Json<Model>, ApiError> {
    let service = state.models.lock().await;

    let existing = service.get(&slug).map_err(ApiError::lookup)?;
    let Json(input) = payload?;

    let now = Utc::now();
    let fields = input
        .fields
        .into_iter()
        .map(|f| {
            let id = f
                .id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .unwrap_or_else(new_id);
            let created_at = existing
                .field(&id)
                .and_then(|prev| prev.created_at)
                .unwrap_or(now);

            build_field(id, f.into(), created_at, now)
        })
        .collect();

    let updated = Model {
        id: existing.id,
        name: input.name,
        slug: existing.slug,
        description: input.description,
        fields,
        status: Status::from_str(&input.status),
        schema_version: existing.schema_version,
    };

    validate_model(&updated).map_err(ApiError::bad_request)?;
    service.update(&updated).map_err(ApiError::bad_request)?;

    tracing::info!("Updated model {}", updated.slug);
    Ok(Json(updated))
}

pub async fn delete_model(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DeleteModelResponse>, ApiError> {
    let service = state.models.lock().await;

    match service.delete(&slug) {
        Ok(()) => {
            tracing::info!("Deleted model {}", slug);
            Ok(Json(DeleteModelResponse { deleted: true }))
        }
        Err(e @ StoreError::NotFound { .. }) => Err(ApiError::not_found(e)),
        Err(e) => Err(ApiError::internal(e)),
    }
}

/// The client-editable part of a field, shared by create and update.
struct FieldInput {
    name: String,
    field_type: String,
    description: String,
    unique: bool,
    required: bool,
    status: String,
}

impl From<CreateFieldInput> for FieldInput {
    fn from(f: CreateFieldInput) -> Self {
        Self {
            name: f.name,
            field_type: f.field_type,
            description: f.description,
            unique: f.unique,
            required: f.required,
            status: f.status,
        }
    }
}

impl From<UpdateFieldInput> for FieldInput {
    fn from(f: UpdateFieldInput) -> Self {
        Self {
            name: f.name,
            field_type: f.field_type,
            description: f.description,
            unique: f.unique,
            required: f.required,
            status: f.status,
        }
    }
}

fn build_field(
    id: String,
    input: FieldInput,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Field {
    Field {
        id,
        name: input.name,
        field_type: FieldType::from_str(&input.field_type),
        description: input.description,
        unique: input.unique,
        required: input.required,
        status: Status::from_str(&input.status),
        created_at: Some(created_at),
        updated_at: Some(updated_at),
    }
}
