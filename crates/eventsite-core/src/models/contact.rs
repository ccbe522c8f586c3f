use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for the contact form. Missing fields deserialize as empty and fail validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct CreateContactRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required."))]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "All fields are required."),
        email(message = "Invalid email address.")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 32, message = "All fields are required."))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required."))]
    pub message: String,
}

impl CreateContactRequest {
    pub fn into_draft(self) -> Contact {
        let now = Utc::now();
        Contact {
            id: 0,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            message: self.message,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactCreatedResponse {
    pub message: String,
    pub data: Contact,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactListResponse {
    pub contacts: Vec<Contact>,
}
