use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use eventsite_core::models::{Gallery, GalleryEnvelope, MessageResponse};
use eventsite_core::{AppError, RecordOp};

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::{ContentSubmission, ContentUploadService};
use crate::state::AppState;

/// Create a gallery entry.
///
/// Up to four images, sent positionally as `images` or per slot as `image1`..`image4`, and
/// one `video`.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/gallery/create",
    tag = "gallery",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Gallery entry created", body = GalleryEnvelope),
        (status = 400, description = "Invalid input, file type or too many images", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "create_gallery"))]
pub async fn create_gallery(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<GalleryEnvelope>), HttpAppError> {
    let submission = ContentSubmission::receive::<Gallery>(multipart, &state.media.policy).await?;

    let written = ContentUploadService::new(state.media.clone())
        .write(state.repos.galleries.as_ref(), RecordOp::Create, submission)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(GalleryEnvelope {
            message: "Event created successfully".to_string(),
            event: written.record,
        }),
    ))
}

/// Update a gallery entry. Slots that receive no file keep their current URL.
#[utoipa::path(
    put,
    path = "/api/v1/dashboard/gallery/update/{id}",
    tag = "gallery",
    params(("id" = i32, Path, description = "Gallery entry id")),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Gallery entry updated", body = GalleryEnvelope),
        (status = 400, description = "Invalid input, file type or too many images", body = ErrorResponse),
        (status = 404, description = "Gallery entry not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "update_gallery"))]
pub async fn update_gallery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<GalleryEnvelope>, HttpAppError> {
    let submission = ContentSubmission::receive::<Gallery>(multipart, &state.media.policy).await?;

    let written = ContentUploadService::new(state.media.clone())
        .write(state.repos.galleries.as_ref(), RecordOp::Update(id), submission)
        .await?;

    Ok(Json(GalleryEnvelope {
        message: "Event updated successfully".to_string(),
        event: written.record,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/gallery/get",
    tag = "gallery",
    responses(
        (status = 200, description = "All gallery entries", body = [Gallery]),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_galleries"))]
pub async fn list_galleries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Gallery>>, HttpAppError> {
    Ok(Json(state.repos.galleries.list().await?))
}

/// Delete a gallery entry. Its files stay in storage.
#[utoipa::path(
    delete,
    path = "/api/v1/dashboard/gallery/delete/{id}",
    tag = "gallery",
    params(("id" = i32, Path, description = "Gallery entry id")),
    responses(
        (status = 200, description = "Gallery entry deleted", body = MessageResponse),
        (status = 404, description = "Gallery entry not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_gallery"))]
pub async fn delete_gallery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    if !state.repos.galleries.delete(id).await? {
        return Err(AppError::NotFound("Event not found!".to_string()).into());
    }
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}
