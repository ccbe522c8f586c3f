use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use eventsite_core::models::{
    FeatureEvent, FeatureEventEnvelope, FeatureEventListEnvelope, MessageResponse,
};
use eventsite_core::{AppError, RecordOp};

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::{ContentSubmission, ContentUploadService};
use crate::state::AppState;

/// Create or update a featured event.
///
/// With an `id` field the event with that id is updated, or created under that id when it
/// does not exist yet. Without one a new event is created.
#[utoipa::path(
    put,
    path = "/api/v1/dashboard/feature-event/update",
    tag = "feature-events",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Feature event created", body = FeatureEventEnvelope),
        (status = 200, description = "Feature event updated", body = FeatureEventEnvelope),
        (status = 400, description = "Invalid input or file type", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "update_feature_event"))]
pub async fn update_feature_event(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FeatureEventEnvelope>), HttpAppError> {
    let submission =
        ContentSubmission::receive::<FeatureEvent>(multipart, &state.media.policy).await?;
    let op = match submission.fields.id()? {
        Some(id) => RecordOp::Upsert(id),
        None => RecordOp::Create,
    };

    let written = ContentUploadService::new(state.media.clone())
        .write(state.repos.feature_events.as_ref(), op, submission)
        .await?;

    let (status, message) = if written.created {
        (StatusCode::CREATED, "Feature Event created successfully")
    } else {
        (StatusCode::OK, "Feature Event updated successfully")
    };

    Ok((
        status,
        Json(FeatureEventEnvelope {
            message: message.to_string(),
            event: written.record,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/dashboard/event/create",
    tag = "feature-events",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Event created", body = FeatureEventEnvelope),
        (status = 400, description = "Invalid input or file type", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "create_event"))]
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FeatureEventEnvelope>), HttpAppError> {
    let submission =
        ContentSubmission::receive::<FeatureEvent>(multipart, &state.media.policy).await?;

    let written = ContentUploadService::new(state.media.clone())
        .write(
            state.repos.feature_events.as_ref(),
            RecordOp::Create,
            submission,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(FeatureEventEnvelope {
            message: "Event created successfully".to_string(),
            event: written.record,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/feature-event/get",
    tag = "feature-events",
    responses(
        (status = 200, description = "All featured events", body = FeatureEventListEnvelope),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_feature_events"))]
pub async fn list_feature_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeatureEventListEnvelope>, HttpAppError> {
    let events = state.repos.feature_events.list().await?;
    Ok(Json(FeatureEventListEnvelope {
        message: "Events retrieved successfully".to_string(),
        events,
    }))
}

/// Delete a featured event. Its files stay in storage.
#[utoipa::path(
    delete,
    path = "/api/v1/dashboard/feature-event/delete/{id}",
    tag = "feature-events",
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_feature_event"))]
pub async fn delete_feature_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    if !state.repos.feature_events.delete(id).await? {
        return Err(AppError::NotFound("Event not found".to_string()).into());
    }
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}
