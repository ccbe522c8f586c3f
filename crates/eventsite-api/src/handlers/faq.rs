//! FAQ entries for the public site. Plain JSON CRUD, no uploads.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use eventsite_core::models::{CreateFaqRequest, MessageResponse, Faq, UpdateFaqRequest};
use eventsite_core::AppError;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

async fn find_faq(state: &AppState, id: i32) -> Result<Faq, AppError> {
    state
        .repos
        .faqs
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound("FAQ not found".to_string()))
}

#[utoipa::path(
    get,
    path = "/api/v1/faqs",
    tag = "faqs",
    responses(
        (status = 200, description = "All faqs", body = [Faq]),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_faqs"))]
pub async fn list_faqs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Faq>>, HttpAppError> {
    Ok(Json(state.repos.faqs.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/faqs/{id}",
    tag = "faqs",
    params(("id" = i32, Path, description = "FAQ id")),
    responses(
        (status = 200, description = "FAQ found", body = Faq),
        (status = 404, description = "FAQ not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_faq"))]
pub async fn get_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Faq>, HttpAppError> {
    Ok(Json(find_faq(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/faqs",
    tag = "faqs",
    request_body = CreateFaqRequest,
    responses(
        (status = 201, description = "FAQ created", body = Faq),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "create_faq"))]
pub async fn create_faq(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateFaqRequest>,
) -> Result<(StatusCode, Json<Faq>), HttpAppError> {
    let created = state.repos.faqs.insert(&request.into_draft(), None).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/faqs/{id}",
    tag = "faqs",
    params(("id" = i32, Path, description = "FAQ id")),
    request_body = UpdateFaqRequest,
    responses(
        (status = 200, description = "FAQ updated", body = Faq),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "FAQ not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "update_faq"))]
pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateFaqRequest>,
) -> Result<Json<Faq>, HttpAppError> {
    let mut faq = find_faq(&state, id).await?;
    request.apply_to(&mut faq);
    Ok(Json(state.repos.faqs.save(&faq).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/faqs/{id}",
    tag = "faqs",
    params(("id" = i32, Path, description = "FAQ id")),
    responses(
        (status = 200, description = "FAQ deleted", body = MessageResponse),
        (status = 404, description = "FAQ not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_faq"))]
pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    if !state.repos.faqs.delete(id).await? {
        return Err(AppError::NotFound("FAQ not found".to_string()).into());
    }
    Ok(Json(MessageResponse::new("FAQ deleted successfully")))
}
