use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// A priced package offer. Field names keep their snake_case wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Offer {
    pub id: i32,
    pub offer_title: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateOfferRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Offer title is required"))]
    pub offer_title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Original price must not be negative"))]
    pub original_price: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[validate(schema(function = "validate_original_price"))]
pub struct UpdateOfferRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Offer title must not be empty"))]
    pub offer_title: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
    /// `null` clears the original price; an absent field keeps it.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub original_price: Option<Option<f64>>,
}

// Distinguishes `"original_price": null` (Some(None)) from an absent field (None).
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

fn validate_original_price(req: &UpdateOfferRequest) -> Result<(), ValidationError> {
    match req.original_price {
        Some(Some(price)) if price < 0.0 => Err(ValidationError::new("original_price")
            .with_message("Original price must not be negative".into())),
        _ => Ok(()),
    }
}

impl CreateOfferRequest {
    pub fn into_draft(self) -> Offer {
        let now = Utc::now();
        Offer {
            id: 0,
            offer_title: self.offer_title,
            description: self.description,
            price: self.price,
            original_price: self.original_price,
            created_at: now,
            updated_at: now,
        }
    }
}

impl UpdateOfferRequest {
    pub fn apply_to(self, offer: &mut Offer) {
        if let Some(title) = self.offer_title {
            offer.offer_title = title;
        }
        if let Some(description) = self.description {
            offer.description = description;
        }
        if let Some(price) = self.price {
            offer.price = price;
        }
        if let Some(original_price) = self.original_price {
            offer.original_price = original_price;
        }
    }
}
