//! Asset association: linking stored upload URLs to the slots of a content record.
//!
//! A content record owns a fixed set of image slots (its *ceiling*) and optionally one video
//! slot. Each slot is `None` or an absolute URL. Incoming files are mapped onto slots by the
//! endpoint's [`UploadLayout`], stored, and then merged with [`merge_assets`]: a slot that
//! received a new file is overwritten, every other slot keeps its current value.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::AppError;

/// Create-vs-update decision for a content write, made by the route rather than inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOp {
    /// Always insert a new record.
    Create,
    /// Update an existing record; 404 when it does not exist.
    Update(i32),
    /// Update the record with this id, or create it with this id when absent.
    Upsert(i32),
}

/// A named asset slot on a record (`image1`..`imageN`, `video`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetSlot {
    /// 1-based image slot index
    Image(u8),
    Video,
}

impl fmt::Display for AssetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetSlot::Image(n) => write!(f, "image{}", n),
            AssetSlot::Video => f.write_str("video"),
        }
    }
}

/// A record type that references uploaded assets.
pub trait AssetBearing {
    /// Human-readable record name used in messages ("Gallery", "Hero", ...)
    const KIND: &'static str;
    /// Maximum number of image slots
    const IMAGE_CEILING: usize;
    /// Whether the record has a video slot
    const HAS_VIDEO: bool;

    /// Mutable access to image slot `slot` (1-based); `None` when out of range.
    fn image_slot_mut(&mut self, slot: u8) -> Option<&mut Option<String>>;

    /// Mutable access to the video slot; `None` when the record has none.
    fn video_slot_mut(&mut self) -> Option<&mut Option<String>> {
        None
    }

    /// Image slots in order.
    fn image_slots(&self) -> Vec<Option<&str>>;

    /// Number of filled image slots.
    fn image_count(&self) -> usize {
        self.image_slots().iter().filter(|s| s.is_some()).count()
    }
}

/// An asset written during the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    /// Storage key (`<category>/<filename>`)
    pub key: String,
    /// Public URL embedded into the record
    pub url: String,
}

/// Assets written during one request, keyed by target slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredAssets {
    pub images: BTreeMap<u8, StoredAsset>,
    pub video: Option<StoredAsset>,
}

impl StoredAssets {
    pub fn insert(&mut self, slot: AssetSlot, asset: StoredAsset) {
        match slot {
            AssetSlot::Image(n) => {
                self.images.insert(n, asset);
            }
            AssetSlot::Video => self.video = Some(asset),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.video.is_none()
    }

    pub fn len(&self) -> usize {
        self.images.len() + usize::from(self.video.is_some())
    }

    /// Storage keys of every asset, for cleanup after a failed persist.
    pub fn keys(&self) -> Vec<String> {
        self.images
            .values()
            .chain(self.video.iter())
            .map(|a| a.key.clone())
            .collect()
    }
}

fn ceiling_message(ceiling: usize) -> String {
    if ceiling == 1 {
        "Cannot upload more than 1 image!".to_string()
    } else {
        format!("Cannot upload more than {} images!", ceiling)
    }
}

/// Reject a submission carrying more image files than the record type can hold.
pub fn check_image_ceiling<R: AssetBearing>(incoming_images: usize) -> Result<(), AppError> {
    if incoming_images > R::IMAGE_CEILING {
        return Err(AppError::InvalidInput(ceiling_message(R::IMAGE_CEILING)));
    }
    Ok(())
}

/// Overwrite the slots that received a new asset; leave the others untouched.
pub fn merge_assets<R: AssetBearing>(record: &mut R, stored: &StoredAssets) -> Result<(), AppError> {
    for (slot, asset) in &stored.images {
        let target = record.image_slot_mut(*slot).ok_or_else(|| {
            AppError::InvalidInput(format!("{} has no slot image{}", R::KIND, slot))
        })?;
        *target = Some(asset.url.clone());
    }

    if let Some(asset) = &stored.video {
        let target = record
            .video_slot_mut()
            .ok_or_else(|| AppError::InvalidInput(format!("{} has no video slot", R::KIND)))?;
        *target = Some(asset.url.clone());
    }

    Ok(())
}

/// Replace `target` when a non-blank value was submitted; otherwise keep the current value.
pub fn merge_scalar(target: &mut String, incoming: Option<&str>) {
    if let Some(value) = incoming.filter(|v| !v.trim().is_empty()) {
        *target = value.to_string();
    }
}

/// Where files sent under a multipart field go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    /// Every file goes to this slot
    Slot(AssetSlot),
    /// Files fill image slots 1..n in submission order
    PositionalImages,
}

/// One accepted file field of a multipart layout.
#[derive(Debug, Clone, Copy)]
pub struct FileField {
    pub name: &'static str,
    pub max_count: usize,
    pub target: FieldTarget,
}

impl FileField {
    pub const fn slot(name: &'static str, slot: AssetSlot) -> Self {
        Self {
            name,
            max_count: 1,
            target: FieldTarget::Slot(slot),
        }
    }

    pub const fn positional_images(name: &'static str, max_count: usize) -> Self {
        Self {
            name,
            max_count,
            target: FieldTarget::PositionalImages,
        }
    }

    fn is_image(&self) -> bool {
        !matches!(self.target, FieldTarget::Slot(AssetSlot::Video))
    }
}

/// The file fields an endpoint accepts and how they map onto record slots.
#[derive(Debug, Clone, Copy)]
pub struct UploadLayout {
    pub fields: &'static [FileField],
}

impl UploadLayout {
    pub const fn new(fields: &'static [FileField]) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FileField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Reject a file field the layout does not know.
    pub fn check_field(&self, name: &str) -> Result<&FileField, AppError> {
        self.field(name)
            .ok_or_else(|| AppError::BadRequest(format!("Unexpected field: {}", name)))
    }

    /// Map received files (field name, payload) onto slots of `R`.
    ///
    /// Enforces, in order: known fields, the record's image ceiling, per-field counts and
    /// one file per slot. Nothing is stored until this succeeds.
    pub fn assign_slots<R: AssetBearing, T>(
        &self,
        files: Vec<(String, T)>,
    ) -> Result<Vec<(AssetSlot, T)>, AppError> {
        let mut image_files = 0usize;
        let mut per_field: BTreeMap<&'static str, usize> = BTreeMap::new();
        for (name, _) in &files {
            let field = self.check_field(name)?;
            if field.is_image() {
                image_files += 1;
            }
            *per_field.entry(field.name).or_default() += 1;
        }

        check_image_ceiling::<R>(image_files)?;

        for (name, count) in &per_field {
            if let Some(field) = self.field(name) {
                if *count > field.max_count {
                    return Err(AppError::BadRequest(format!(
                        "Too many files for field '{}' (max {})",
                        name, field.max_count
                    )));
                }
            }
        }

        let mut assigned: Vec<(AssetSlot, T)> = Vec::with_capacity(files.len());
        let mut next_positional: u8 = 1;
        for (name, payload) in files {
            let field = self.check_field(&name)?;
            let slot = match field.target {
                FieldTarget::Slot(slot) => slot,
                FieldTarget::PositionalImages => {
                    let slot = AssetSlot::Image(next_positional);
                    next_positional += 1;
                    slot
                }
            };
            if let AssetSlot::Image(n) = slot {
                if usize::from(n) > R::IMAGE_CEILING {
                    return Err(AppError::InvalidInput(ceiling_message(R::IMAGE_CEILING)));
                }
            }
            if slot == AssetSlot::Video && !R::HAS_VIDEO {
                return Err(AppError::BadRequest(format!("{} has no video slot", R::KIND)));
            }
            if assigned.iter().any(|(s, _)| *s == slot) {
                return Err(AppError::BadRequest(format!(
                    "Multiple files supplied for slot {}",
                    slot
                )));
            }
            assigned.push((slot, payload));
        }

        Ok(assigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Album {
        image1: Option<String>,
        image2: Option<String>,
        image3: Option<String>,
        video: Option<String>,
    }

    impl AssetBearing for Album {
        const KIND: &'static str = "Album";
        const IMAGE_CEILING: usize = 3;
        const HAS_VIDEO: bool = true;

        fn image_slot_mut(&mut self, slot: u8) -> Option<&mut Option<String>> {
            match slot {
                1 => Some(&mut self.image1),
                2 => Some(&mut self.image2),
                3 => Some(&mut self.image3),
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
            ]
        }
    }

    const ALBUM_FIELDS: &[FileField] = &[
        FileField::positional_images("images", 3),
        FileField::slot("image1", AssetSlot::Image(1)),
        FileField::slot("image2", AssetSlot::Image(2)),
        FileField::slot("image3", AssetSlot::Image(3)),
        FileField::slot("video", AssetSlot::Video),
    ];
    const ALBUM_LAYOUT: UploadLayout = UploadLayout::new(ALBUM_FIELDS);

    fn asset(name: &str) -> StoredAsset {
        StoredAsset {
            key: format!("images/{}", name),
            url: format!("http://x/uploads/images/{}", name),
        }
    }

    fn files(names: &[&str]) -> Vec<(String, usize)> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.to_string(), i))
            .collect()
    }

    #[test]
    fn merge_overwrites_only_supplied_slots() {
        let mut album = Album {
            image1: Some("old1".into()),
            image2: Some("old2".into()),
            image3: Some("old3".into()),
            video: Some("oldv".into()),
        };
        let mut stored = StoredAssets::default();
        stored.insert(AssetSlot::Image(2), asset("new2.png"));

        merge_assets(&mut album, &stored).unwrap();

        assert_eq!(album.image1.as_deref(), Some("old1"));
        assert_eq!(
            album.image2.as_deref(),
            Some("http://x/uploads/images/new2.png")
        );
        assert_eq!(album.image3.as_deref(), Some("old3"));
        assert_eq!(album.video.as_deref(), Some("oldv"));
    }

    #[test]
    fn merge_with_nothing_stored_is_a_no_op() {
        let mut album = Album {
            image1: Some("a".into()),
            ..Default::default()
        };
        let before = album.clone();
        merge_assets(&mut album, &StoredAssets::default()).unwrap();
        assert_eq!(album, before);
        assert_eq!(album.image_count(), 1);
    }

    #[test]
    fn merge_rejects_out_of_range_slot() {
        let mut album = Album::default();
        let mut stored = StoredAssets::default();
        stored.insert(AssetSlot::Image(4), asset("x.png"));
        assert!(merge_assets(&mut album, &stored).is_err());
    }

    #[test]
    fn ceiling_is_enforced_with_message() {
        assert!(check_image_ceiling::<Album>(3).is_ok());
        let err = check_image_ceiling::<Album>(4).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Cannot upload more than 3 images!");
    }

    #[test]
    fn positional_images_fill_slots_in_order() {
        let assigned = ALBUM_LAYOUT
            .assign_slots::<Album, _>(files(&["images", "images", "video"]))
            .unwrap();
        let slots: Vec<AssetSlot> = assigned.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            slots,
            vec![AssetSlot::Image(1), AssetSlot::Image(2), AssetSlot::Video]
        );
    }

    #[test]
    fn too_many_positional_images_hit_the_ceiling() {
        let err = ALBUM_LAYOUT
            .assign_slots::<Album, _>(files(&["images", "images", "images", "images"]))
            .unwrap_err();
        assert!(err.to_string().contains("Cannot upload more than 3 images!"));
    }

    #[test]
    fn explicit_slot_is_honoured() {
        let assigned = ALBUM_LAYOUT
            .assign_slots::<Album, _>(files(&["image2"]))
            .unwrap();
        assert_eq!(assigned[0].0, AssetSlot::Image(2));
    }

    #[test]
    fn duplicate_slot_is_rejected() {
        let err = ALBUM_LAYOUT
            .assign_slots::<Album, _>(files(&["images", "image1"]))
            .unwrap_err();
        assert!(err.to_string().contains("slot image1"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = ALBUM_LAYOUT
            .assign_slots::<Album, _>(files(&["avatar"]))
            .unwrap_err();
        assert!(err.to_string().contains("Unexpected field: avatar"));
    }

    #[test]
    fn second_video_is_rejected() {
        let err = ALBUM_LAYOUT
            .assign_slots::<Album, _>(files(&["video", "video"]))
            .unwrap_err();
        assert!(err.to_string().contains("video"));
    }

    #[test]
    fn merge_scalar_keeps_existing_on_blank() {
        let mut title = "Summer Gala".to_string();
        merge_scalar(&mut title, None);
        merge_scalar(&mut title, Some(""));
        merge_scalar(&mut title, Some("   "));
        assert_eq!(title, "Summer Gala");
        merge_scalar(&mut title, Some("Winter Gala"));
        assert_eq!(title, "Winter Gala");
    }

    #[test]
    fn stored_assets_keys_cover_images_and_video() {
        let mut stored = StoredAssets::default();
        assert!(stored.is_empty());
        stored.insert(AssetSlot::Image(1), asset("a.png"));
        stored.insert(
            AssetSlot::Video,
            StoredAsset {
                key: "videos/v.mp4".into(),
                url: "http://x/uploads/videos/v.mp4".into(),
            },
        );
        assert_eq!(stored.len(), 2);
        assert_eq!(
            stored.keys(),
            vec!["images/a.png".to_string(), "videos/v.mp4".to_string()]
        );
    }
}
