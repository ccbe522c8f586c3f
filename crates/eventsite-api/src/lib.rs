//! Eventsite API Library
//!
//! This crate provides the HTTP handlers, the multipart content write path and the
//! application setup (database, storage, routes, tracing).

mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;

pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use telemetry::init_tracing;
