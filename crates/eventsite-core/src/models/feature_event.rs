use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{parse_event_datetime, ContentRecord, FormFields};
use crate::assets::{merge_scalar, AssetBearing, AssetSlot, FileField, UploadLayout};
use crate::error::AppError;

/// A featured upcoming event shown on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct FeatureEvent {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub date_time: DateTime<Utc>,
    pub location: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureEventFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

/// Layout shared by every single-image record.
pub(crate) const SINGLE_IMAGE_FIELDS: &[FileField] =
    &[FileField::slot("image", AssetSlot::Image(1))];

impl AssetBearing for FeatureEvent {
    const KIND: &'static str = "FeatureEvent";
    const IMAGE_CEILING: usize = 1;
    const HAS_VIDEO: bool = false;

    fn image_slot_mut(&mut self, slot: u8) -> Option<&mut Option<String>> {
        (slot == 1).then_some(&mut self.image)
    }

    fn image_slots(&self) -> Vec<Option<&str>> {
        vec![self.image.as_deref()]
    }
}

impl ContentRecord for FeatureEvent {
    type Fields = FeatureEventFields;
    const LAYOUT: UploadLayout = UploadLayout::new(SINGLE_IMAGE_FIELDS);
    const NOT_FOUND_MESSAGE: &'static str = "Event not found";

    fn parse_fields(form: &FormFields) -> Result<FeatureEventFields, AppError> {
        let date_time = form
            .get(&["dateTime", "date_time"])
            .map(parse_event_datetime)
            .transpose()?;

        Ok(FeatureEventFields {
            title: form.get_owned(&["title"]),
            description: form.get_owned(&["description"]),
            date_time,
            location: form.get_owned(&["location"]),
        })
    }

    fn draft(fields: &FeatureEventFields) -> Result<Self, AppError> {
        match (&fields.title, fields.date_time, &fields.location) {
            (Some(title), Some(date_time), Some(location)) => {
                let now = Utc::now();
                Ok(FeatureEvent {
                    id: 0,
                    title: title.clone(),
                    description: fields.description.clone().unwrap_or_default(),
                    date_time,
                    location: location.clone(),
                    image: None,
                    created_at: now,
                    updated_at: now,
                })
            }
            _ => Err(AppError::InvalidInput(
                "Title, dateTime, and location are required!".to_string(),
            )),
        }
    }

    fn apply(&mut self, fields: &FeatureEventFields) {
        merge_scalar(&mut self.title, fields.title.as_deref());
        merge_scalar(&mut self.description, fields.description.as_deref());
        merge_scalar(&mut self.location, fields.location.as_deref());
        if let Some(date_time) = fields.date_time {
            self.date_time = date_time;
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeatureEventEnvelope {
    pub message: String,
    pub event: FeatureEvent,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeatureEventListEnvelope {
    pub message: String,
    pub events: Vec<FeatureEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        pairs.iter().copied().collect()
    }

    #[test]
    fn accepts_camel_and_snake_date_field() {
        let camel = FeatureEvent::parse_fields(&form(&[("dateTime", "2025-09-01T19:00")])).unwrap();
        let snake = FeatureEvent::parse_fields(&form(&[("date_time", "2025-09-01T19:00")])).unwrap();
        assert_eq!(camel.date_time, snake.date_time);
        assert!(camel.date_time.is_some());
    }

    #[test]
    fn draft_requires_title_date_and_location() {
        let fields =
            FeatureEvent::parse_fields(&form(&[("title", "Gala"), ("location", "Hall A")])).unwrap();
        let err = FeatureEvent::draft(&fields).unwrap_err();
        assert!(err.to_string().contains("Title, dateTime, and location are required!"));
    }

    #[test]
    fn draft_defaults_description() {
        let fields = FeatureEvent::parse_fields(&form(&[
            ("title", "Gala"),
            ("location", "Hall A"),
            ("dateTime", "2025-09-01T19:00:00Z"),
        ]))
        .unwrap();
        let event = FeatureEvent::draft(&fields).unwrap();
        assert_eq!(event.description, "");
        assert!(event.image.is_none());
    }

    #[test]
    fn apply_keeps_date_when_absent() {
        let fields = FeatureEvent::parse_fields(&form(&[
            ("title", "Gala"),
            ("location", "Hall A"),
            ("dateTime", "2025-09-01T19:00:00Z"),
        ]))
        .unwrap();
        let mut event = FeatureEvent::draft(&fields).unwrap();
        let original = event.date_time;
        event.apply(&FeatureEventFields {
            location: Some("Hall B".into()),
            ..Default::default()
        });
        assert_eq!(event.date_time, original);
        assert_eq!(event.location, "Hall B");
        assert_eq!(event.title, "Gala");
    }

    #[test]
    fn serializes_date_time_as_camel_case() {
        let fields = FeatureEvent::parse_fields(&form(&[
            ("title", "Gala"),
            ("location", "Hall A"),
            ("dateTime", "2025-09-01T19:00:00Z"),
        ]))
        .unwrap();
        let json = serde_json::to_value(FeatureEvent::draft(&fields).unwrap()).unwrap();
        assert!(json.get("dateTime").is_some());
    }
}
