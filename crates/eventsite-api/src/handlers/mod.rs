pub mod contact;
pub mod faq;
pub mod feature_event;
pub mod gallery;
pub mod health;
pub mod hero;
pub mod offer;
pub mod service;
