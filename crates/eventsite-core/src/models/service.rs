use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::feature_event::SINGLE_IMAGE_FIELDS;
use super::{ContentRecord, FormFields};
use crate::assets::{merge_scalar, AssetBearing, UploadLayout};
use crate::error::AppError;

/// An offered service (wedding planning, catering, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFields {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl AssetBearing for Service {
    const KIND: &'static str = "Service";
    const IMAGE_CEILING: usize = 1;
    const HAS_VIDEO: bool = false;

    fn image_slot_mut(&mut self, slot: u8) -> Option<&mut Option<String>> {
        (slot == 1).then_some(&mut self.image)
    }

    fn image_slots(&self) -> Vec<Option<&str>> {
        vec![self.image.as_deref()]
    }
}

impl ContentRecord for Service {
    type Fields = ServiceFields;
    const LAYOUT: UploadLayout = UploadLayout::new(SINGLE_IMAGE_FIELDS);
    const NOT_FOUND_MESSAGE: &'static str = "Service not found";

    fn parse_fields(form: &FormFields) -> Result<ServiceFields, AppError> {
        Ok(ServiceFields {
            title: form.get_owned(&["title"]),
            description: form.get_owned(&["description"]),
        })
    }

    fn draft(fields: &ServiceFields) -> Result<Self, AppError> {
        let title = fields
            .title
            .clone()
            .ok_or_else(|| AppError::InvalidInput("Title is required!".to_string()))?;
        let now = Utc::now();
        Ok(Service {
            id: 0,
            title,
            description: fields.description.clone().unwrap_or_default(),
            image: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn apply(&mut self, fields: &ServiceFields) {
        merge_scalar(&mut self.title, fields.title.as_deref());
        merge_scalar(&mut self.description, fields.description.as_deref());
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceEnvelope {
    pub message: String,
    pub event: Service,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceListEnvelope {
    pub message: String,
    pub events: Vec<Service>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_alone_is_enough() {
        let form: FormFields = [("title", "Wedding Planning")].into_iter().collect();
        let service = Service::draft(&Service::parse_fields(&form).unwrap()).unwrap();
        assert_eq!(service.title, "Wedding Planning");
        assert_eq!(service.description, "");
        assert!(service.image.is_none());
    }

    #[test]
    fn missing_title_is_rejected() {
        let form: FormFields = [("description", "x")].into_iter().collect();
        let err = Service::draft(&Service::parse_fields(&form).unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Title is required!");
    }
}
