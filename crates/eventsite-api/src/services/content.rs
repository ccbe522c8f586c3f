//! Multipart content writes shared by the hero, feature-event, service and gallery endpoints.
//!
//! A write runs in a fixed order: receive and check every file, map files onto slots,
//! resolve the target record, store the files, merge the URLs, persist. Files are only
//! written once every check has passed, and are deleted again (best effort) if the
//! record cannot be persisted.

use axum::extract::Multipart;
use bytes::Bytes;
use eventsite_core::{
    merge_assets, AppError, AssetSlot, ContentRecord, FormFields, MediaCategory, RecordOp,
    StoredAsset, StoredAssets, UploadPolicy,
};
use eventsite_db::RecordRepository;

use crate::error::multipart_error;
use crate::state::MediaState;

/// One file part that passed the upload policy.
#[derive(Debug, Clone)]
pub struct ReceivedFile {
    pub field: String,
    pub original_filename: String,
    pub category: MediaCategory,
    pub data: Bytes,
}

/// A fully read multipart body.
#[derive(Debug, Clone, Default)]
pub struct ContentSubmission {
    pub fields: FormFields,
    pub files: Vec<ReceivedFile>,
}

impl ContentSubmission {
    /// Drain a multipart body. Text parts become form fields; file parts must belong to
    /// `R`'s layout and pass the upload policy. Nothing is written to storage here.
    pub async fn receive<R: ContentRecord>(
        mut multipart: Multipart,
        policy: &UploadPolicy,
    ) -> Result<Self, AppError> {
        let mut submission = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().map(str::to_string).unwrap_or_default();

            let Some(file_name) = field.file_name().map(str::to_string) else {
                let value = field.text().await.map_err(multipart_error)?;
                submission.fields.insert(name, value);
                continue;
            };

            R::LAYOUT.check_field(&name)?;
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.map_err(multipart_error)?;

            // Browsers send an untouched file input as an empty, nameless part.
            if file_name.is_empty() && data.is_empty() {
                continue;
            }

            let accepted = policy.check(content_type.as_deref(), &file_name, data.len())?;
            tracing::debug!(
                field = %name,
                filename = %file_name,
                content_type = %accepted.content_type,
                size_bytes = data.len(),
                "Upload accepted"
            );

            submission.files.push(ReceivedFile {
                field: name,
                original_filename: file_name,
                category: accepted.category,
                data,
            });
        }

        Ok(submission)
    }
}

/// Result of a content write.
#[derive(Debug, Clone)]
pub struct ContentWrite<R> {
    pub record: R,
    /// True when a new row was inserted (create, or upsert of a missing id)
    pub created: bool,
}

#[derive(Clone, Copy)]
enum Persist {
    Insert(Option<i32>),
    Save,
}

/// Stores uploaded files and links them to content records.
pub struct ContentUploadService {
    media: MediaState,
}

impl ContentUploadService {
    pub fn new(media: MediaState) -> Self {
        Self { media }
    }

    /// Apply `submission` to the record selected by `op` and persist it.
    #[tracing::instrument(skip(self, repo, submission), fields(record = R::KIND, files = submission.files.len()))]
    pub async fn write<R: ContentRecord>(
        &self,
        repo: &dyn RecordRepository<R>,
        op: RecordOp,
        submission: ContentSubmission,
    ) -> Result<ContentWrite<R>, AppError> {
        let fields = R::parse_fields(&submission.fields)?;
        let files = submission
            .files
            .into_iter()
            .map(|f| (f.field.clone(), f))
            .collect();
        let slots = R::LAYOUT.assign_slots::<R, _>(files)?;

        let (mut record, persist) = Self::resolve(repo, op, &fields).await?;

        let stored = self.store_files(slots).await?;

        if let Err(e) = merge_assets(&mut record, &stored) {
            self.spawn_cleanup(stored.keys());
            return Err(e);
        }

        let result = match persist {
            Persist::Insert(id) => repo.insert(&record, id).await,
            Persist::Save => repo.save(&record).await,
        };

        match result {
            Ok(record) => {
                let created = matches!(persist, Persist::Insert(_));
                tracing::info!(
                    id = record.id(),
                    created,
                    assets = stored.len(),
                    "Content record written"
                );
                Ok(ContentWrite { record, created })
            }
            Err(e) => {
                tracing::error!(error = %e, assets = stored.len(), "Persist failed, removing stored files");
                self.spawn_cleanup(stored.keys());
                Err(e)
            }
        }
    }

    /// The record to modify and how it will be persisted. Scalars are merged here, so
    /// missing required fields and unknown ids fail before any file is stored.
    async fn resolve<R: ContentRecord>(
        repo: &dyn RecordRepository<R>,
        op: RecordOp,
        fields: &R::Fields,
    ) -> Result<(R, Persist), AppError> {
        match op {
            RecordOp::Create => Ok((R::draft(fields)?, Persist::Insert(None))),
            RecordOp::Update(id) => {
                let mut record = repo
                    .find(id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(R::NOT_FOUND_MESSAGE.to_string()))?;
                record.apply(fields);
                Ok((record, Persist::Save))
            }
            RecordOp::Upsert(id) => match repo.find(id).await? {
                Some(mut record) => {
                    record.apply(fields);
                    Ok((record, Persist::Save))
                }
                None => {
                    let mut record = R::draft(fields)?;
                    record.set_id(id);
                    Ok((record, Persist::Insert(Some(id))))
                }
            },
        }
    }

    async fn store_files(
        &self,
        slots: Vec<(AssetSlot, ReceivedFile)>,
    ) -> Result<StoredAssets, AppError> {
        let mut stored = StoredAssets::default();

        for (slot, file) in slots {
            let written = self
                .media
                .storage
                .store_upload(file.category, &file.original_filename, file.data)
                .await;

            match written {
                Ok(written) => {
                    let url = self.media.urls.url_for(written.category, &written.filename);
                    tracing::debug!(slot = %slot, key = %written.key, "Asset stored");
                    stored.insert(
                        slot,
                        StoredAsset {
                            key: written.key,
                            url,
                        },
                    );
                }
                Err(e) => {
                    self.spawn_cleanup(stored.keys());
                    return Err(e.into());
                }
            }
        }

        Ok(stored)
    }

    /// Best-effort removal of files written by a request that did not complete.
    fn spawn_cleanup(&self, keys: Vec<String>) {
        if keys.is_empty() {
            return;
        }

        let storage = self.media.storage.clone();
        tokio::spawn(async move {
            for key in keys {
                if let Err(e) = storage.delete(&key).await {
                    tracing::warn!(error = %e, key = %key, "Failed to remove orphaned upload");
                }
            }
        });
    }
}
