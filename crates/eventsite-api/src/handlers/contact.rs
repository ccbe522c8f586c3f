use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use eventsite_core::models::{ContactCreatedResponse, ContactListResponse, CreateContactRequest};

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Save a contact-form submission.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/contact/create",
    tag = "contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact saved", body = ContactCreatedResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "create_contact"))]
pub async fn create_contact(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactCreatedResponse>), HttpAppError> {
    let data = state
        .repos
        .contacts
        .insert(&request.into_draft(), None)
        .await?;
    tracing::info!(contact_id = data.id, "Contact saved");

    Ok((
        StatusCode::CREATED,
        Json(ContactCreatedResponse {
            message: "Contact saved!".to_string(),
            data,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/contact/get",
    tag = "contacts",
    responses(
        (status = 200, description = "All contact submissions", body = ContactListResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_contacts"))]
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContactListResponse>, HttpAppError> {
    let contacts = state.repos.contacts.list().await?;
    Ok(Json(ContactListResponse { contacts }))
}
