use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use eventsite_core::models::{CreateOfferRequest, MessageResponse, Offer, UpdateOfferRequest};
use eventsite_core::AppError;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

async fn find_offer(state: &AppState, id: i32) -> Result<Offer, AppError> {
    state
        .repos
        .offers
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Offer not found".to_string()))
}

#[utoipa::path(
    get,
    path = "/api/v1/offers",
    tag = "offers",
    responses(
        (status = 200, description = "All offers", body = [Offer]),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_offers"))]
pub async fn list_offers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Offer>>, HttpAppError> {
    Ok(Json(state.repos.offers.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/offers/{id}",
    tag = "offers",
    params(("id" = i32, Path, description = "Offer id")),
    responses(
        (status = 200, description = "Offer found", body = Offer),
        (status = 404, description = "Offer not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_offer"))]
pub async fn get_offer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Offer>, HttpAppError> {
    Ok(Json(find_offer(&state, id).await?))
}

/// Create an offer. `original_price`, when given, is shown struck through next to `price`.
#[utoipa::path(
    post,
    path = "/api/v1/offers",
    tag = "offers",
    request_body = CreateOfferRequest,
    responses(
        (status = 201, description = "Offer created", body = Offer),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "create_offer"))]
pub async fn create_offer(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateOfferRequest>,
) -> Result<(StatusCode, Json<Offer>), HttpAppError> {
    let created = state.repos.offers.insert(&request.into_draft(), None).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update. Absent fields are kept; `"original_price": null` clears the original price.
#[utoipa::path(
    put,
    path = "/api/v1/offers/{id}",
    tag = "offers",
    params(("id" = i32, Path, description = "Offer id")),
    request_body = UpdateOfferRequest,
    responses(
        (status = 200, description = "Offer updated", body = Offer),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "Offer not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "update_offer"))]
pub async fn update_offer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateOfferRequest>,
) -> Result<Json<Offer>, HttpAppError> {
    let mut offer = find_offer(&state, id).await?;
    request.apply_to(&mut offer);
    Ok(Json(state.repos.offers.save(&offer).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/offers/{id}",
    tag = "offers",
    params(("id" = i32, Path, description = "Offer id")),
    responses(
        (status = 200, description = "Offer deleted", body = MessageResponse),
        (status = 404, description = "Offer not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_offer"))]
pub async fn delete_offer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    if !state.repos.offers.delete(id).await? {
        return Err(AppError::NotFound("Offer not found".to_string()).into());
    }
    Ok(Json(MessageResponse::new("Offer deleted successfully")))
}
