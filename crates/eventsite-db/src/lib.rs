//! Eventsite database layer
//!
//! Repositories for the site's content tables, behind the [`RecordRepository`] trait so
//! handlers can run against PostgreSQL or, in tests, an in-memory store.

pub mod db;

pub use db::{
    FeatureEventRepository, GalleryRepository, HeroRepository, RecordRepository, Repositories,
    ServiceRepository, ContactRepository, FaqRepository, OfferRepository,
};
