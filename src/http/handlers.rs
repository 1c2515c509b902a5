//! Route handlers: validate, call one service method, wrap the result.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode, Uri};
use serde_json::Value;

use super::error::ApiError;
use super::response::Envelope;
use crate::domain::{
    ListParams, Note, validate_create, validate_id, validate_list, validate_update,
};
use crate::infra::NoteStore;
use crate::service::{NoteService, ServiceResult};

pub type SharedService<S> = Arc<NoteService<S>>;

/// Runs a service call on the blocking pool; storage is synchronous file I/O.
async fn blocking<S, T, F>(service: &SharedService<S>, call: F) -> Result<T, ApiError>
where
    S: NoteStore,
    T: Send + 'static,
    F: FnOnce(&NoteService<S>) -> ServiceResult<T> + Send + 'static,
{
    let service = Arc::clone(service);
    let result = tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;
    Ok(result?)
}

pub async fn create_note<S: NoteStore>(
    State(service): State<SharedService<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Note>>), ApiError> {
    let Json(body) = body?;
    let new = validate_create(&body)?;

    let note = blocking(&service, move |s| s.create(new)).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Note created successfully", note)),
    ))
}

pub async fn list_notes<S: NoteStore>(
    State(service): State<SharedService<S>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Envelope<Vec<Note>>>, ApiError> {
    let Query(params) = params?;
    let query = validate_list(&params)?;

    let page = blocking(&service, move |s| s.list(&query)).await?;

    Ok(Json(Envelope::paginated(
        "Notes retrieved successfully",
        page.items,
        page.pagination,
    )))
}

pub async fn get_note<S: NoteStore>(
    State(service): State<SharedService<S>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<Note>>, ApiError> {
    let Path(id) = id?;
    let id = validate_id(&id)?;

    let note = blocking(&service, move |s| s.get(&id)).await?;

    Ok(Json(Envelope::new("Note retrieved successfully", note)))
}

pub async fn update_note<S: NoteStore>(
    State(service): State<SharedService<S>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Note>>, ApiError> {
    let Path(id) = id?;
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            // Report a bad id alongside an unreadable body, as validate_update would.
            let mut err = ApiError::from(rejection);
            if let (ApiError::Validation(details), Err(mut id_errors)) =
                (&mut err, validate_id(&id))
            {
                id_errors.append(details);
                *details = id_errors;
            }
            return Err(err);
        }
    };
    let (id, patch) = validate_update(&id, &body)?;

    let note = blocking(&service, move |s| s.update(&id, patch)).await?;

    Ok(Json(Envelope::new("Note updated successfully", note)))
}

pub async fn delete_note<S: NoteStore>(
    State(service): State<SharedService<S>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<Note>>, ApiError> {
    let Path(id) = id?;
    let id = validate_id(&id)?;

    let note = blocking(&service, move |s| s.delete(&id)).await?;

    Ok(Json(Envelope::new("Note deleted successfully", note)))
}

pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound {
        method,
        path: uri.path().to_string(),
    }
}
