pub mod contact;
pub mod faq;
pub mod feature_event;
pub mod gallery;
pub mod hero;
pub mod offer;
pub mod service;

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::assets::{AssetBearing, UploadLayout};
use crate::error::AppError;

pub use contact::*;
pub use faq::*;
pub use feature_event::*;
pub use gallery::*;
pub use hero::*;
pub use offer::*;
pub use service::*;

/// Bare `{ message }` body returned by deletes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Text fields of a multipart submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    values: HashMap<String, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field; a later value for the same name replaces the earlier one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// First non-blank value among `names` (aliases such as `dateTime` / `date_time`).
    pub fn get(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .filter_map(|n| self.values.get(*n))
            .map(|v| v.as_str())
            .find(|v| !v.trim().is_empty())
    }

    pub fn get_owned(&self, names: &[&str]) -> Option<String> {
        self.get(names).map(|v| v.trim().to_string())
    }

    /// Parse an optional integer id field.
    pub fn id(&self) -> Result<Option<i32>, AppError> {
        self.get(&["id"])
            .map(|raw| {
                raw.trim()
                    .parse::<i32>()
                    .map_err(|_| AppError::InvalidInput(format!("Invalid id: {}", raw)))
            })
            .transpose()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FormFields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

/// A stored row with an integer id and creation/update timestamps.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
    fn created_at(&self) -> DateTime<Utc>;
    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>);
}

macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> i32 {
                    self.id
                }

                fn set_id(&mut self, id: i32) {
                    self.id = id;
                }

                fn created_at(&self) -> DateTime<Utc> {
                    self.created_at
                }

                fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
                    self.created_at = created_at;
                    self.updated_at = updated_at;
                }
            }
        )+
    };
}

impl_record!(Hero, FeatureEvent, Service, Gallery, Contact, Faq, Offer);

/// A content record written through a multipart endpoint.
pub trait ContentRecord: Record + AssetBearing {
    /// Scalar (non-file) input for this record type
    type Fields: Send + Sync;

    /// File fields the endpoints for this record accept
    const LAYOUT: UploadLayout;

    /// Body of the 404 returned when an update targets a missing record
    const NOT_FOUND_MESSAGE: &'static str;

    fn parse_fields(form: &FormFields) -> Result<Self::Fields, AppError>;

    /// A new record built from submitted fields. Fails when a required field is missing.
    fn draft(fields: &Self::Fields) -> Result<Self, AppError>;

    /// Merge submitted scalars into an existing record; blank values keep the current ones.
    fn apply(&mut self, fields: &Self::Fields);
}

/// Parse an event date from RFC 3339 or an HTML `datetime-local` value (read as UTC).
pub fn parse_event_datetime(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(AppError::InvalidInput(format!("Invalid dateTime: {}", raw)))
}
