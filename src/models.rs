pub mod analytics;
pub mod auth;
pub mod configuration;
pub mod document;
pub mod messaging;
pub mod organization;
pub mod scheduling;
