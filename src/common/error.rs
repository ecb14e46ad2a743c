// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

/// Entities that can be reported as missing. Cross-tenant lookups use the
/// same variants so a foreign id is indistinguishable from an absent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Organization,
    User,
    Document,
    ServiceType,
    Appointment,
    Message,
}

impl Resource {
    fn message_key(self) -> &'static str {
        match self {
            Resource::Organization => "not_found.organization",
            Resource::User => "not_found.user",
            Resource::Document => "not_found.document",
            Resource::ServiceType => "not_found.service_type",
            Resource::Appointment => "not_found.appointment",
            Resource::Message => "not_found.message",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service type is inactive")]
    InactiveServiceType,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Access denied")]
    Forbidden,

    #[error("{0:?} not found")]
    ResourceNotFound(Resource),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Maps PostgreSQL constraint violations onto the domain taxonomy.
    /// Anything unrecognized stays a database error.
    pub fn from_constraint(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                return AppError::EmailAlreadyExists;
            }
            if db_err.is_foreign_key_violation() {
                return match db_err.constraint() {
                    Some(c) if c.contains("service_type") => {
                        AppError::ResourceNotFound(Resource::ServiceType)
                    }
                    _ => AppError::ResourceNotFound(Resource::Organization),
                };
            }
            if db_err.is_check_violation() {
                return AppError::InvalidInput(db_err.message().to_string());
            }
        }
        e.into()
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::InactiveServiceType => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation.failed",
            AppError::InvalidInput(_) => "validation.invalid_input",
            AppError::InactiveServiceType => "validation.inactive_service_type",
            AppError::EmailAlreadyExists => "auth.email_exists",
            AppError::InvalidCredentials => "auth.invalid_credentials",
            AppError::InvalidToken => "auth.invalid_token",
            AppError::Forbidden => "auth.forbidden",
            AppError::ResourceNotFound(resource) => resource.message_key(),
            _ => "internal.unexpected",
        }
    }

    /// Converts the error into its localized wire form.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();
        let message = store.translate(&locale.0, self.message_key());

        match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                ApiError::with_details(status, message, Value::Object(details))
            }
            AppError::InvalidInput(reason) => {
                ApiError::new(status, format!("{}: {}", message, reason))
            }
            e if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Internal server error: {:?}", e);
                ApiError::new(status, message)
            }
            _ => ApiError::new(status, message),
        }
    }
}

/// The JSON error body every endpoint returns.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status, error: error.into(), details: None }
    }

    pub fn with_details(status: StatusCode, error: impl Into<String>, details: Value) -> Self {
        Self { status, error: error.into(), details: Some(details) }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn english() -> Locale {
        Locale("en".to_string())
    }

    #[test]
    fn taxonomy_maps_to_http_status() {
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::ResourceNotFound(Resource::Document).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::EmailAlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::InactiveServiceType.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let store = I18nStore::new();
        let api = AppError::InternalServerError(anyhow::anyhow!("password=hunter2"))
            .to_api_error(&english(), &store);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("hunter2"));
        assert!(api.details.is_none());
    }

    #[derive(Validate)]
    struct NamedPayload {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let store = I18nStore::new();
        let errors = NamedPayload { name: "a".into() }.validate().unwrap_err();
        let api = AppError::ValidationError(errors).to_api_error(&english(), &store);

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details present");
        assert_eq!(details["name"], json!(["too short"]));
    }

    #[test]
    fn not_found_is_localized() {
        let store = I18nStore::new();
        let pt = Locale("pt".to_string());
        let api = AppError::ResourceNotFound(Resource::Organization).to_api_error(&pt, &store);
        assert_eq!(api.error, "Organização não encontrada.");
    }
}
