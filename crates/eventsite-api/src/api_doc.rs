//! OpenAPI documentation.
//!
//! Handler annotations carry literal `/api/v1` paths; [`get_openapi_spec`] checks them
//! against `API_PREFIX` in tests.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use eventsite_core::models;

/// The OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Eventsite API",
        version = "0.1.0",
        description = "Content API for the event site dashboard: hero banner, featured events, services and gallery with image/video uploads, plus contacts, FAQs and offers. Uploaded files are served under /uploads."
    ),
    paths(
        handlers::health::health_check,
        // Hero
        handlers::hero::update_hero,
        handlers::hero::get_hero,
        // Feature events
        handlers::feature_event::update_feature_event,
        handlers::feature_event::create_event,
        handlers::feature_event::list_feature_events,
        handlers::feature_event::delete_feature_event,
        // Services
        handlers::service::create_service,
        handlers::service::update_service,
        handlers::service::list_services,
        handlers::service::delete_service,
        // Gallery
        handlers::gallery::create_gallery,
        handlers::gallery::update_gallery,
        handlers::gallery::list_galleries,
        handlers::gallery::delete_gallery,
        // Contacts
        handlers::contact::create_contact,
        handlers::contact::list_contacts,
        // FAQs
        handlers::faq::list_faqs,
        handlers::faq::get_faq,
        handlers::faq::create_faq,
        handlers::faq::update_faq,
        handlers::faq::delete_faq,
        // Offers
        handlers::offer::list_offers,
        handlers::offer::get_offer,
        handlers::offer::create_offer,
        handlers::offer::update_offer,
        handlers::offer::delete_offer,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::health::HealthResponse,
        models::MessageResponse,
        models::Hero,
        models::HeroEnvelope,
        models::HeroListEnvelope,
        models::FeatureEvent,
        models::FeatureEventEnvelope,
        models::FeatureEventListEnvelope,
        models::Service,
        models::ServiceEnvelope,
        models::ServiceListEnvelope,
        models::Gallery,
        models::GalleryEnvelope,
        models::Contact,
        models::CreateContactRequest,
        models::ContactCreatedResponse,
        models::ContactListResponse,
        models::Faq,
        models::CreateFaqRequest,
        models::UpdateFaqRequest,
        models::Offer,
        models::CreateOfferRequest,
        models::UpdateOfferRequest,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "hero", description = "Landing-page hero banner"),
        (name = "feature-events", description = "Featured upcoming events"),
        (name = "services", description = "Services offered"),
        (name = "gallery", description = "Past-event gallery"),
        (name = "contacts", description = "Contact form submissions"),
        (name = "faqs", description = "Frequently asked questions"),
        (name = "offers", description = "Priced package offers")
    )
)]
pub struct ApiDoc;
