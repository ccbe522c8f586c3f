use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use eventsite_core::models::{MessageResponse, Service, ServiceEnvelope, ServiceListEnvelope};
use eventsite_core::{AppError, RecordOp};

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::{ContentSubmission, ContentUploadService};
use crate::state::AppState;

/// Create a service. Only `title` is required; `description` and `image` are optional.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/service/create",
    tag = "services",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Service created", body = ServiceEnvelope),
        (status = 400, description = "Invalid input or file type", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "create_service"))]
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ServiceEnvelope>), HttpAppError> {
    let submission = ContentSubmission::receive::<Service>(multipart, &state.media.policy).await?;

    let written = ContentUploadService::new(state.media.clone())
        .write(state.repos.services.as_ref(), RecordOp::Create, submission)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ServiceEnvelope {
            message: "Service created successfully".to_string(),
            event: written.record,
        }),
    ))
}

/// Update the service named by the `id` form field.
#[utoipa::path(
    put,
    path = "/api/v1/dashboard/service/update",
    tag = "services",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Service updated", body = ServiceEnvelope),
        (status = 400, description = "Missing id, invalid input or file type", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "update_service"))]
pub async fn update_service(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ServiceEnvelope>, HttpAppError> {
    let submission = ContentSubmission::receive::<Service>(multipart, &state.media.policy).await?;
    let id = submission
        .fields
        .id()?
        .ok_or_else(|| AppError::InvalidInput("Service id is required!".to_string()))?;

    let written = ContentUploadService::new(state.media.clone())
        .write(state.repos.services.as_ref(), RecordOp::Update(id), submission)
        .await?;

    Ok(Json(ServiceEnvelope {
        message: "Service updated successfully".to_string(),
        event: written.record,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/service/get",
    tag = "services",
    responses(
        (status = 200, description = "All services", body = ServiceListEnvelope),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_services"))]
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ServiceListEnvelope>, HttpAppError> {
    let events = state.repos.services.list().await?;
    Ok(Json(ServiceListEnvelope {
        message: "Service retrieved successfully".to_string(),
        events,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/dashboard/service/delete/{id}",
    tag = "services",
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service deleted", body = MessageResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_service"))]
pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    if !state.repos.services.delete(id).await? {
        return Err(AppError::NotFound("Service not found".to_string()).into());
    }
    Ok(Json(MessageResponse::new("Service deleted successfully")))
}
