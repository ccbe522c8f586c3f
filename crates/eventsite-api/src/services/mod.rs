pub mod content;

pub use content::{ContentSubmission, ContentUploadService, ContentWrite};
