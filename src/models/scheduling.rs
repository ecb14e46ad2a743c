// src/models/scheduling.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("The price cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

// =============================================================================
//  SERVICE TYPES
// =============================================================================

// Inactive service types stay in place so old appointments keep their reference
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ServiceType {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration: i32, // minutes
    #[schema(value_type = f64, example = 500.0)]
    pub price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceTypePayload {
    #[validate(length(min = 1, max = 255, message = "The service name is required."))]
    #[schema(example = "Consultation")]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 1, message = "The duration must be at least one minute."))]
    #[schema(example = 30)]
    pub duration: i32,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    #[schema(value_type = f64, example = 500.0)]
    pub price: Decimal,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceTypePayload {
    #[validate(length(min = 1, max = 255, message = "The service name cannot be empty."))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(range(min = 1, message = "The duration must be at least one minute."))]
    pub duration: Option<i32>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,

    pub is_active: Option<bool>,
}

// =============================================================================
//  APPOINTMENTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Appointment {
    pub id: i64,
    pub organization_id: i64,
    pub service_type_id: i64,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub appointment_date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub channel: Option<String>, // whatsapp, telegram, ...
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAppointmentPayload {
    pub service_type_id: i64,

    #[validate(length(min = 1, max = 255, message = "The customer name is required."))]
    #[schema(example = "Rohit Patil")]
    pub customer_name: String,

    #[validate(email(message = "The customer email is invalid."))]
    pub customer_email: Option<String>,

    #[validate(length(max = 50))]
    pub customer_phone: Option<String>,

    pub appointment_date: DateTime<Utc>,

    #[validate(length(max = 50))]
    #[schema(example = "whatsapp")]
    pub channel: Option<String>,

    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAppointmentPayload {
    pub appointment_date: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}
