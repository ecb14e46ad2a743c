// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Maps the `user_role` Postgres enum. Wire values are kept from the
/// existing dashboard client (`saas_owner` is the platform owner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[sqlx(rename = "saas_owner")]
    #[serde(rename = "saas_owner")]
    PlatformOwner,
    OrgAdmin,
    OrgManager,
    OrgSupport,
}

// A user as stored in the database
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    pub role: Role,
    pub organization_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user, joined with the organization name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub organization_id: Option<i64>,
    pub organization_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(email(message = "The email address is invalid."))]
    #[schema(example = "agent@clinic.example")]
    pub email: String,

    #[validate(length(min = 6, message = "The password must have at least 6 characters."))]
    pub password: String,

    #[validate(length(min = 1, max = 255, message = "The name is required."))]
    pub name: String,

    pub role: Role,

    pub organization_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "The email address is invalid."))]
    pub email: String,
    #[validate(length(min = 1, message = "The password is required."))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserProfile,
}

// Claims carried inside the JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,   // user id
    pub exp: usize, // expiration
    pub iat: usize, // issued at
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_wire_names_match_the_dashboard_client() {
        assert_eq!(serde_json::to_value(Role::PlatformOwner).unwrap(), json!("saas_owner"));
        assert_eq!(serde_json::to_value(Role::OrgSupport).unwrap(), json!("org_support"));
        let role: Role = serde_json::from_value(json!("org_manager")).unwrap();
        assert_eq!(role, Role::OrgManager);
    }

    #[test]
    fn register_payload_rejects_bad_email_and_short_password() {
        let payload: RegisterUserPayload = serde_json::from_value(json!({
            "email": "not-an-email",
            "password": "123",
            "name": "Test User",
            "role": "org_support"
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: 1,
            email: "admin@saas.com".into(),
            name: "SaaS Owner".into(),
            password_hash: "$2b$12$secret".into(),
            role: Role::PlatformOwner,
            organization_id: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["role"], json!("saas_owner"));
    }
}
