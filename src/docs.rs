// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Organizations ---
        handlers::organizations::list_organizations,
        handlers::organizations::create_organization,
        handlers::organizations::get_organization,
        handlers::organizations::update_organization,
        handlers::organizations::list_organization_users,

        // --- Configuration ---
        handlers::configuration::get_configuration,
        handlers::configuration::update_configuration,

        // --- Knowledge base ---
        handlers::documents::list_documents,
        handlers::documents::create_document,
        handlers::documents::get_document,
        handlers::documents::delete_document,

        // --- Scheduling ---
        handlers::scheduling::list_service_types,
        handlers::scheduling::create_service_type,
        handlers::scheduling::update_service_type,
        handlers::scheduling::list_appointments,
        handlers::scheduling::create_appointment,
        handlers::scheduling::get_appointment,
        handlers::scheduling::update_appointment,

        // --- Messaging ---
        handlers::messages::list_messages,
        handlers::messages::create_message,
        handlers::messages::get_message,

        // --- Analytics ---
        handlers::analytics::get_organization_analytics,
        handlers::analytics::list_metrics,
        handlers::analytics::get_platform_analytics,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::UserProfile,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::TokenResponse,

            // --- Organizations ---
            models::organization::SubscriptionStatus,
            models::organization::Organization,
            models::organization::CreateOrganizationPayload,
            models::organization::UpdateOrganizationPayload,

            // --- Configuration ---
            models::configuration::Configuration,
            models::configuration::UpdateConfigurationPayload,

            // --- Knowledge base ---
            models::document::DocumentKind,
            models::document::DocumentStatus,
            models::document::Document,
            models::document::CreateDocumentPayload,

            // --- Scheduling ---
            models::scheduling::ServiceType,
            models::scheduling::CreateServiceTypePayload,
            models::scheduling::UpdateServiceTypePayload,
            models::scheduling::AppointmentStatus,
            models::scheduling::Appointment,
            models::scheduling::CreateAppointmentPayload,
            models::scheduling::UpdateAppointmentPayload,

            // --- Messaging ---
            models::messaging::MessageType,
            models::messaging::Message,
            models::messaging::CreateMessagePayload,

            // --- Analytics ---
            models::analytics::OrganizationAnalytics,
            models::analytics::DailyActivity,
            models::analytics::MonthlyTrend,
            models::analytics::PlatformAnalytics,
            models::analytics::OrganizationActivity,
            models::analytics::MetricRecord,
        )
    ),
    tags(
        (name = "Auth", description = "Login, registration and the caller's profile"),
        (name = "Organizations", description = "Tenant onboarding and administration"),
        (name = "Configuration", description = "Channel and assistant settings per organization"),
        (name = "Knowledge Base", description = "Documents the assistant answers from"),
        (name = "Scheduling", description = "Service types and appointments"),
        (name = "Messaging", description = "Customer conversations"),
        (name = "Analytics", description = "Dashboards and stored metrics")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
