// src/seed.rs

//! Deterministic demo data set: the platform owner, four organizations with
//! their admins, and some scheduling, messaging and metric history for each.
//! Everything is written in one transaction, so a failed run leaves nothing
//! behind and the next run starts over.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde_json::json;

use crate::{
    common::error::AppError,
    config::AppState,
    db::{AnalyticsRepository, AppointmentRepository, MessageRepository, NewUser, ServiceTypeRepository},
    models::{
        auth::Role,
        messaging::{CreateMessagePayload, MessageType},
        organization::CreateOrganizationPayload,
        scheduling::{
            AppointmentStatus, CreateAppointmentPayload, CreateServiceTypePayload,
            UpdateAppointmentPayload,
        },
    },
    services::auth::hash_password,
};

pub const OWNER_EMAIL: &str = "admin@saas.com";
pub const DEFAULT_PASSWORD: &str = "password";

// (name, industry, admin email, admin name)
pub const ORGANIZATIONS: [(&str, &str, &str, &str); 4] = [
    ("Mumbai Tech Innovators", "Technology", "admin@mumbaitech.in", "Amit Sharma"),
    ("Delhi HealthCare", "Healthcare", "admin@delhihealth.in", "Priya Singh"),
    ("Bangalore Legal Experts", "Legal", "admin@blrlegal.in", "Rahul Verma"),
    ("Chennai FinServ", "Finance", "admin@chennaifin.in", "Lakshmi Iyer"),
];

// (name, description, minutes, price in rupees)
const SERVICE_TYPES: [(&str, &str, i32, i64); 4] = [
    ("Consultation", "General consultation", 30, 500),
    ("Follow-up", "Follow-up appointment", 15, 300),
    ("Legal Advice", "Legal advisory session", 45, 1500),
    ("Tax Planning", "Tax planning session", 60, 2000),
];

// (name, email, phone)
const CUSTOMERS: [(&str, &str, &str); 4] = [
    ("Rohit Patil", "rohit.patil@example.com", "9876543210"),
    ("Sneha Desai", "sneha.desai@example.com", "9123456780"),
    ("Vikram Joshi", "vikram.joshi@example.com", "9988776655"),
    ("Anjali Mehta", "anjali.mehta@example.com", "9001122334"),
];

const MESSAGES: [&str; 5] = [
    "Namaste, mujhe appointment book karni hai.",
    "Kya aap mujhe kal ka slot de sakte hain?",
    "Dhanyavaad! Appointment confirm ho gayi.",
    "Main thoda late ho jaunga.",
    "Kya aap mujhe prescription bhej sakte hain?",
];

const METRICS: [(&str, f64); 3] = [
    ("total_appointments", 120.0),
    ("avg_response_time", 45.2),
    ("active_users", 35.0),
];

const CHANNELS: [&str; 2] = ["whatsapp", "telegram"];
const STATUSES: [AppointmentStatus; 3] = [
    AppointmentStatus::Scheduled,
    AppointmentStatus::Confirmed,
    AppointmentStatus::Completed,
];

/// Loads the demo data. Returns `false` without writing anything when the
/// platform owner already exists.
pub async fn seed(app_state: &AppState) -> Result<bool, AppError> {
    if app_state.user_repo.find_by_email(OWNER_EMAIL).await?.is_some() {
        return Ok(false);
    }

    let pool = &app_state.db_pool;
    let service_type_repo = ServiceTypeRepository::new(pool.clone());
    let appointment_repo = AppointmentRepository::new(pool.clone());
    let message_repo = MessageRepository::new(pool.clone());
    let metrics_repo = AnalyticsRepository::new(pool.clone());

    // Every seeded account shares the same password
    let password_hash = hash_password(DEFAULT_PASSWORD).await?;
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    // 1. Platform owner
    app_state
        .user_repo
        .create_user(
            &mut *tx,
            NewUser {
                email: OWNER_EMAIL,
                name: "SaaS Owner",
                password_hash: &password_hash,
                role: Role::PlatformOwner,
                organization_id: None,
            },
        )
        .await?;

    for (org_index, (name, industry, admin_email, admin_name)) in ORGANIZATIONS.iter().enumerate() {
        // 2. Organization and its admin
        let (organization, _) = app_state
            .organization_service
            .onboard(
                &mut *tx,
                &CreateOrganizationPayload {
                    name: name.to_string(),
                    industry: Some(industry.to_string()),
                    admin_email: admin_email.to_string(),
                    admin_name: admin_name.to_string(),
                    admin_password: DEFAULT_PASSWORD.to_string(),
                },
                &password_hash,
            )
            .await?;

        // 3. Service types
        let mut service_type_ids = Vec::with_capacity(SERVICE_TYPES.len());
        for (st_name, description, duration, price) in SERVICE_TYPES {
            let service_type = service_type_repo
                .create_service_type(
                    &mut *tx,
                    organization.id,
                    &CreateServiceTypePayload {
                        name: st_name.to_string(),
                        description: Some(description.to_string()),
                        duration,
                        price: Decimal::from(price),
                    },
                )
                .await?;
            service_type_ids.push(service_type.id);
        }

        // 4. Appointments, spread over the next days
        for i in 0..3 {
            let pick = org_index + i;
            let (customer_name, email, phone) = CUSTOMERS[pick % CUSTOMERS.len()];
            let appointment = appointment_repo
                .create_appointment(
                    &mut *tx,
                    organization.id,
                    &CreateAppointmentPayload {
                        service_type_id: service_type_ids[pick % service_type_ids.len()],
                        customer_name: customer_name.to_string(),
                        customer_email: Some(email.to_string()),
                        customer_phone: Some(phone.to_string()),
                        appointment_date: now + Duration::days(1 + (pick as i64 * 3) % 10),
                        channel: Some(CHANNELS[pick % CHANNELS.len()].to_string()),
                        notes: Some("Auto-generated appointment".to_string()),
                    },
                )
                .await?;

            let status = STATUSES[pick % STATUSES.len()];
            if status != AppointmentStatus::Scheduled {
                appointment_repo
                    .update_appointment(
                        &mut *tx,
                        organization.id,
                        appointment.id,
                        &UpdateAppointmentPayload {
                            status: Some(status),
                            ..Default::default()
                        },
                    )
                    .await?;
            }
        }

        // 5. Messages
        for i in 0..3 {
            let pick = org_index * 3 + i;
            message_repo
                .create_message(
                    &mut *tx,
                    organization.id,
                    &CreateMessagePayload {
                        customer_id: (1000 + pick * 137).to_string(),
                        channel: CHANNELS[pick % CHANNELS.len()].to_string(),
                        content: MESSAGES[pick % MESSAGES.len()].to_string(),
                        message_type: MessageType::Text,
                        is_from_customer: pick % 2 == 0,
                        response_time: Some(10.0 + (pick as f64 * 17.5) % 110.0),
                    },
                )
                .await?;
        }

        // 6. Stored metrics
        for (metric_index, (metric_name, base)) in METRICS.iter().enumerate() {
            let offset = ((org_index + metric_index) as f64 * 3.7) % 20.0 - 10.0;
            metrics_repo
                .record_metric(
                    &mut *tx,
                    Some(organization.id),
                    metric_name,
                    base + offset,
                    now,
                    json!({ "region": "India" }),
                )
                .await?;
        }

        tracing::info!("🌱 Seeded organization {} ({})", organization.id, name);
    }

    tx.commit().await?;

    Ok(true)
}
