use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use eventsite_core::models::{Hero, HeroEnvelope, HeroListEnvelope, HERO_ID};
use eventsite_core::RecordOp;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::{ContentSubmission, ContentUploadService};
use crate::state::AppState;

/// Create or update the hero banner.
///
/// The hero is a singleton: the first submission creates it (all of `name`, `description`
/// and `motto` required), later ones update it. Files go to `image1`, `image2` and `video`;
/// slots without a new file keep their current URL.
#[utoipa::path(
    put,
    path = "/api/v1/dashboard/hero/update",
    tag = "hero",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Hero section created", body = HeroEnvelope),
        (status = 200, description = "Hero section updated", body = HeroEnvelope),
        (status = 400, description = "Invalid input or file type", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "update_hero"))]
pub async fn update_hero(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<HeroEnvelope>), HttpAppError> {
    let submission = ContentSubmission::receive::<Hero>(multipart, &state.media.policy).await?;

    let written = ContentUploadService::new(state.media.clone())
        .write(
            state.repos.heroes.as_ref(),
            RecordOp::Upsert(HERO_ID),
            submission,
        )
        .await?;

    let (status, message) = if written.created {
        (StatusCode::CREATED, "Hero section created successfully")
    } else {
        (StatusCode::OK, "Hero section updated successfully")
    };

    Ok((
        status,
        Json(HeroEnvelope {
            message: message.to_string(),
            item: written.record,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/hero/get",
    tag = "hero",
    responses(
        (status = 200, description = "Hero section (empty list before the first update)", body = HeroListEnvelope),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_hero"))]
pub async fn get_hero(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HeroListEnvelope>, HttpAppError> {
    let item = state.repos.heroes.list().await?;
    Ok(Json(HeroListEnvelope {
        message: "Hero section retrieved successfully".to_string(),
        item,
    }))
}
