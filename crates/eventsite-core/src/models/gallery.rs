use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ContentRecord, FormFields};
use crate::assets::{merge_scalar, AssetBearing, AssetSlot, FileField, UploadLayout};
use crate::error::AppError;

/// A past-event gallery entry: up to four images and one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    pub id: i32,
    pub title: String,
    pub image1: Option<String>,
    pub image2: Option<String>,
    pub image3: Option<String>,
    pub image4: Option<String>,
    pub video: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryFields {
    pub title: Option<String>,
}

// `images` fills slots 1..n in order; `imageN` targets one slot directly.
const GALLERY_FILE_FIELDS: &[FileField] = &[
    FileField::positional_images("images", 4),
    FileField::slot("image1", AssetSlot::Image(1)),
    FileField::slot("image2", AssetSlot::Image(2)),
    FileField::slot("image3", AssetSlot::Image(3)),
    FileField::slot("image4", AssetSlot::Image(4)),
    FileField::slot("video", AssetSlot::Video),
];

impl AssetBearing for Gallery {
    const KIND: &'static str = "Gallery";
    const IMAGE_CEILING: usize = 4;
    const HAS_VIDEO: bool = true;

    fn image_slot_mut(&mut self, slot: u8) -> Option<&mut Option<String>> {
        match slot {
            1 => Some(&mut self.image1),
            2 => Some(&mut self.image2),
            3 => Some(&mut self.image3),
            4 => Some(&mut self.image4),
            _ => None,
        }
    }

    fn video_slot_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.video)
    }

    fn image_slots(&self) -> Vec<Option<&str>> {
        vec![
            self.image1.as_deref(),
            self.image2.as_deref(),
            self.image3.as_deref(),
            self.image4.as_deref(),
        ]
    }
}

impl ContentRecord for Gallery {
    type Fields = GalleryFields;
    const LAYOUT: UploadLayout = UploadLayout::new(GALLERY_FILE_FIELDS);
    const NOT_FOUND_MESSAGE: &'static str = "Event not found!";

    fn parse_fields(form: &FormFields) -> Result<GalleryFields, AppError> {
        Ok(GalleryFields {
            title: form.get_owned(&["title"]),
        })
    }

    fn draft(fields: &GalleryFields) -> Result<Self, AppError> {
        let title = fields
            .title
            .clone()
            .ok_or_else(|| AppError::InvalidInput("Title is required!".to_string()))?;
        let now = Utc::now();
        Ok(Gallery {
            id: 0,
            title,
            image1: None,
            image2: None,
            image3: None,
            image4: None,
            video: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn apply(&mut self, fields: &GalleryFields) {
        merge_scalar(&mut self.title, fields.title.as_deref());
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GalleryEnvelope {
    pub message: String,
    pub event: Gallery,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{merge_assets, StoredAsset, StoredAssets};

    #[test]
    fn gallery_layout_accepts_four_positional_images() {
        let files: Vec<(String, ())> = (0..4).map(|_| ("images".to_string(), ())).collect();
        let slots = Gallery::LAYOUT.assign_slots::<Gallery, _>(files).unwrap();
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[3].0, AssetSlot::Image(4));
    }

    #[test]
    fn five_images_hit_the_gallery_ceiling() {
        let files: Vec<(String, ())> = (0..5).map(|_| ("images".to_string(), ())).collect();
        let err = Gallery::LAYOUT.assign_slots::<Gallery, _>(files).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Cannot upload more than 4 images!");
    }

    #[test]
    fn slot_only_update_keeps_other_images() {
        let mut gallery = Gallery::draft(&GalleryFields {
            title: Some("Spring Fair".into()),
        })
        .unwrap();
        gallery.image1 = Some("u1".into());
        gallery.image3 = Some("u3".into());
        gallery.image4 = Some("u4".into());

        let mut stored = StoredAssets::default();
        stored.insert(
            AssetSlot::Image(2),
            StoredAsset {
                key: "images/2.png".into(),
                url: "http://h/uploads/images/2.png".into(),
            },
        );
        merge_assets(&mut gallery, &stored).unwrap();
        gallery.apply(&GalleryFields::default());

        assert_eq!(gallery.image1.as_deref(), Some("u1"));
        assert_eq!(gallery.image2.as_deref(), Some("http://h/uploads/images/2.png"));
        assert_eq!(gallery.image3.as_deref(), Some("u3"));
        assert_eq!(gallery.image4.as_deref(), Some("u4"));
        assert_eq!(gallery.title, "Spring Fair");
    }
}
