pub mod access_policy;
pub mod analytics_service;
pub mod auth;
pub mod configuration_service;
pub mod document_service;
pub mod messaging_service;
pub mod organization_service;
pub mod scheduling_service;
