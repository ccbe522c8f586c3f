//! Database repositories for data access layer
//!
//! One repository per content table. Every repository implements [`RecordRepository`];
//! handlers hold them as trait objects inside [`Repositories`].

pub mod contact;
pub mod faq;
pub mod feature_event;
pub mod gallery;
pub mod hero;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod offer;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use eventsite_core::models::{Contact, Faq, FeatureEvent, Gallery, Hero, Offer, Service};
use eventsite_core::AppError;
use sqlx::PgPool;

pub use contact::PostgresContactRepository;
pub use faq::PostgresFaqRepository;
pub use feature_event::PostgresFeatureEventRepository;
pub use gallery::PostgresGalleryRepository;
pub use hero::PostgresHeroRepository;
pub use offer::PostgresOfferRepository;
pub use service::PostgresServiceRepository;

/// CRUD over one table of records.
#[async_trait]
pub trait RecordRepository<R>: Send + Sync {
    async fn find(&self, id: i32) -> Result<Option<R>, AppError>;

    /// All records, oldest first.
    async fn list(&self) -> Result<Vec<R>, AppError>;

    /// Insert a new row. With `Some(id)` the row gets that id, replacing any row that
    /// already holds it; otherwise the database assigns one.
    async fn insert(&self, record: &R, id: Option<i32>) -> Result<R, AppError>;

    /// Overwrite every field of an existing row and bump `updated_at`.
    async fn save(&self, record: &R) -> Result<R, AppError>;

    /// Returns `false` when no row had that id.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;
}

pub type HeroRepository = dyn RecordRepository<Hero>;
pub type FeatureEventRepository = dyn RecordRepository<FeatureEvent>;
pub type ServiceRepository = dyn RecordRepository<Service>;
pub type GalleryRepository = dyn RecordRepository<Gallery>;
pub type ContactRepository = dyn RecordRepository<Contact>;
pub type FaqRepository = dyn RecordRepository<Faq>;
pub type OfferRepository = dyn RecordRepository<Offer>;

/// Every repository the API uses.
#[derive(Clone)]
pub struct Repositories {
    pub heroes: Arc<HeroRepository>,
    pub feature_events: Arc<FeatureEventRepository>,
    pub services: Arc<ServiceRepository>,
    pub galleries: Arc<GalleryRepository>,
    pub contacts: Arc<ContactRepository>,
    pub faqs: Arc<FaqRepository>,
    pub offers: Arc<OfferRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            heroes: Arc::new(PostgresHeroRepository::new(pool.clone())),
            feature_events: Arc::new(PostgresFeatureEventRepository::new(pool.clone())),
            services: Arc::new(PostgresServiceRepository::new(pool.clone())),
            galleries: Arc::new(PostgresGalleryRepository::new(pool.clone())),
            contacts: Arc::new(PostgresContactRepository::new(pool.clone())),
            faqs: Arc::new(PostgresFaqRepository::new(pool.clone())),
            offers: Arc::new(PostgresOfferRepository::new(pool)),
        }
    }

    /// Fresh, empty in-memory repositories.
    #[cfg(any(test, feature = "test-util"))]
    pub fn memory() -> Self {
        use memory::MemoryRepository;

        Self {
            heroes: Arc::new(MemoryRepository::<Hero>::new()),
            feature_events: Arc::new(MemoryRepository::<FeatureEvent>::new()),
            services: Arc::new(MemoryRepository::<Service>::new()),
            galleries: Arc::new(MemoryRepository::<Gallery>::new()),
            contacts: Arc::new(MemoryRepository::<Contact>::new()),
            faqs: Arc::new(MemoryRepository::<Faq>::new()),
            offers: Arc::new(MemoryRepository::<Offer>::new()),
        }
    }
}

/// Move an identity sequence past the highest id after a row was inserted with an explicit id.
pub(crate) async fn resync_identity(pool: &PgPool, table: &'static str) -> Result<(), AppError> {
    let sql = format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), GREATEST((SELECT COALESCE(MAX(id), 0) FROM {table}), 1))"
    );
    sqlx::query(&sql).execute(pool).await?;
    Ok(())
}
