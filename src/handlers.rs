pub mod analytics;
pub mod auth;
pub mod configuration;
pub mod documents;
pub mod messages;
pub mod organizations;
pub mod scheduling;
