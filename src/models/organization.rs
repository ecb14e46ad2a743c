// src/models/organization.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "subscription_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
    Suspended,
}

// The tenant: a business using the assistant
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub industry: Option<String>,
    pub subscription_status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Onboarding payload: the organization plus its first administrator.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrganizationPayload {
    #[validate(length(min = 1, max = 255, message = "The organization name is required."))]
    #[schema(example = "Mumbai Tech Innovators")]
    pub name: String,

    #[validate(length(max = 100, message = "The industry must have at most 100 characters."))]
    #[schema(example = "Technology")]
    pub industry: Option<String>,

    #[validate(email(message = "The admin email is invalid."))]
    pub admin_email: String,

    #[validate(length(min = 1, max = 255, message = "The admin name is required."))]
    pub admin_name: String,

    #[validate(length(min = 6, message = "The admin password must have at least 6 characters."))]
    pub admin_password: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrganizationPayload {
    #[validate(length(min = 1, max = 255, message = "The organization name cannot be empty."))]
    pub name: Option<String>,

    #[validate(length(max = 100, message = "The industry must have at most 100 characters."))]
    pub industry: Option<String>,

    pub subscription_status: Option<SubscriptionStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_payload_accepts_partial_bodies() {
        let payload: UpdateOrganizationPayload =
            serde_json::from_value(json!({ "subscription_status": "suspended" })).unwrap();
        assert!(payload.name.is_none());
        assert!(payload.industry.is_none());
        assert_eq!(payload.subscription_status, Some(SubscriptionStatus::Suspended));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn update_payload_rejects_empty_name() {
        let payload = UpdateOrganizationPayload {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn unknown_subscription_status_is_rejected() {
        let parsed: Result<UpdateOrganizationPayload, _> =
            serde_json::from_value(json!({ "subscription_status": "trial" }));
        assert!(parsed.is_err());
    }
}
