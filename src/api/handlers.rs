use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode, Uri};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;
use crate::model::Note;
use crate::service::NoteService;
use crate::validation;

pub type AppState = Arc<NoteService>;

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct TagQuery {
    tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

/// GET /health
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        timestamp: Utc::now(),
    })
}

/// POST /notes
pub async fn create_note(
    State(service): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let Json(payload) = payload?;
    let draft = validation::parse_new_note(&payload)?;
    let note = service.create(draft)?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /notes?tag=
pub async fn list_notes(
    State(service): State<AppState>,
    query: Result<Query<TagQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Note>>> {
    let Query(query) = query?;
    let tag = validation::parse_tag_query(query.tag.as_deref(), false)?;
    Ok(Json(service.list(tag.as_deref())?))
}

/// GET /notes/search?tag=
pub async fn search_notes(
    State(service): State<AppState>,
    query: Result<Query<TagQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Note>>> {
    let Query(query) = query?;
    let tag = validation::parse_tag_query(query.tag.as_deref(), true)?.unwrap_or_default();
    Ok(Json(service.search_by_tag(&tag)?))
}

/// GET /notes/{id}
pub async fn get_note(
    State(service): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Note>> {
    let Path(id) = id?;
    let id = validation::parse_note_id(&id)?;
    Ok(Json(service.get(&id)?))
}

/// PATCH /notes/{id}
pub async fn update_note(
    State(service): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Note>> {
    let Path(id) = id?;
    let id = validation::parse_note_id(&id)?;
    let Json(payload) = payload?;
    let patch = validation::parse_note_patch(&payload)?;
    Ok(Json(service.update(&id, patch)?))
}

/// DELETE /notes/{id}
pub async fn delete_note(
    State(service): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    let id = validation::parse_note_id(&id)?;
    service.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unknown paths and unsupported methods.
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route {} {} not found", method, uri.path()))
}
