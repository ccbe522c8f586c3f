use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ContentRecord, FormFields};
use crate::assets::{merge_scalar, AssetBearing, AssetSlot, FileField, UploadLayout};
use crate::error::AppError;

/// The hero banner is a singleton stored under this id.
pub const HERO_ID: i32 = 1;

/// Landing-page hero banner: two images and an optional video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub motto: String,
    pub video: Option<String>,
    pub image1: Option<String>,
    pub image2: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub motto: Option<String>,
}

const HERO_FILE_FIELDS: &[FileField] = &[
    FileField::slot("image1", AssetSlot::Image(1)),
    FileField::slot("image2", AssetSlot::Image(2)),
    FileField::slot("video", AssetSlot::Video),
];

impl AssetBearing for Hero {
    const KIND: &'static str = "Hero";
    const IMAGE_CEILING: usize = 2;
    const HAS_VIDEO: bool = true;

    fn image_slot_mut(&mut self, slot: u8) -> Option<&mut Option<String>> {
        match slot {
            1 => Some(&mut self.image1),
            2 => Some(&mut self.image2),
            _ => None,
        }
    }

    fn video_slot_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.video)
    }

    fn image_slots(&self) -> Vec<Option<&str>> {
        vec![self.image1.as_deref(), self.image2.as_deref()]
    }
}

impl ContentRecord for Hero {
    type Fields = HeroFields;
    const LAYOUT: UploadLayout = UploadLayout::new(HERO_FILE_FIELDS);
    const NOT_FOUND_MESSAGE: &'static str = "Hero section not found";

    fn parse_fields(form: &FormFields) -> Result<HeroFields, AppError> {
        Ok(HeroFields {
            name: form.get_owned(&["name"]),
            description: form.get_owned(&["description"]),
            motto: form.get_owned(&["motto"]),
        })
    }

    fn draft(fields: &HeroFields) -> Result<Self, AppError> {
        match (&fields.name, &fields.description, &fields.motto) {
            (Some(name), Some(description), Some(motto)) => {
                let now = Utc::now();
                Ok(Hero {
                    id: HERO_ID,
                    name: name.clone(),
                    description: description.clone(),
                    motto: motto.clone(),
                    video: None,
                    image1: None,
                    image2: None,
                    created_at: now,
                    updated_at: now,
                })
            }
            _ => Err(AppError::InvalidInput(
                "Name, description, and motto are required!".to_string(),
            )),
        }
    }

    fn apply(&mut self, fields: &HeroFields) {
        merge_scalar(&mut self.name, fields.name.as_deref());
        merge_scalar(&mut self.description, fields.description.as_deref());
        merge_scalar(&mut self.motto, fields.motto.as_deref());
    }
}

/// `{ message, item }` envelope returned by hero writes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HeroEnvelope {
    pub message: String,
    pub item: Hero,
}

/// `{ message, item: [...] }` envelope returned by the hero listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HeroListEnvelope {
    pub message: String,
    pub item: Vec<Hero>,
}
