pub mod user_repo;
pub use user_repo::{NewUser, UserRepository};
pub mod organization_repo;
pub use organization_repo::OrganizationRepository;
pub mod configuration_repo;
pub use configuration_repo::ConfigurationRepository;
pub mod document_repo;
pub use document_repo::DocumentRepository;
pub mod service_type_repo;
pub use service_type_repo::ServiceTypeRepository;
pub mod appointment_repo;
pub use appointment_repo::AppointmentRepository;
pub mod message_repo;
pub use message_repo::MessageRepository;
pub mod analytics_repo;
pub use analytics_repo::AnalyticsRepository;
