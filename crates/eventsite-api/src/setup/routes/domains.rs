//! Domain route groups (dashboard content, contacts, FAQs, offers).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::Arc;

fn api(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

pub fn hero_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&api("/dashboard/hero/update"), put(handlers::hero::update_hero))
        .route(&api("/dashboard/hero/get"), get(handlers::hero::get_hero))
}

pub fn feature_event_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &api("/dashboard/feature-event/update"),
            put(handlers::feature_event::update_feature_event),
        )
        .route(
            &api("/dashboard/event/create"),
            post(handlers::feature_event::create_event),
        )
        .route(
            &api("/dashboard/feature-event/get"),
            get(handlers::feature_event::list_feature_events),
        )
        .route(
            &api("/dashboard/feature-event/delete/{id}"),
            delete(handlers::feature_event::delete_feature_event),
        )
}

pub fn service_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &api("/dashboard/service/create"),
            post(handlers::service::create_service),
        )
        .route(
            &api("/dashboard/service/update"),
            put(handlers::service::update_service),
        )
        .route(
            &api("/dashboard/service/get"),
            get(handlers::service::list_services),
        )
        .route(
            &api("/dashboard/service/delete/{id}"),
            delete(handlers::service::delete_service),
        )
}

pub fn gallery_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &api("/dashboard/gallery/create"),
            post(handlers::gallery::create_gallery),
        )
        .route(
            &api("/dashboard/gallery/update/{id}"),
            put(handlers::gallery::update_gallery),
        )
        .route(
            &api("/dashboard/gallery/get"),
            get(handlers::gallery::list_galleries),
        )
        .route(
            &api("/dashboard/gallery/delete/{id}"),
            delete(handlers::gallery::delete_gallery),
        )
}

pub fn contact_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &api("/dashboard/contact/create"),
            post(handlers::contact::create_contact),
        )
        .route(
            &api("/dashboard/contact/get"),
            get(handlers::contact::list_contacts),
        )
}

pub fn faq_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &api("/faqs"),
            get(handlers::faq::list_faqs).post(handlers::faq::create_faq),
        )
        .route(
            &api("/faqs/{id}"),
            get(handlers::faq::get_faq)
                .put(handlers::faq::update_faq)
                .delete(handlers::faq::delete_faq),
        )
}

pub fn offer_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &api("/offers"),
            get(handlers::offer::list_offers).post(handlers::offer::create_offer),
        )
        .route(
            &api("/offers/{id}"),
            get(handlers::offer::get_offer)
                .put(handlers::offer::update_offer)
                .delete(handlers::offer::delete_offer),
        )
}
