// src/models/analytics.rs

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

// 1. Per-organization dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct OrganizationAnalytics {
    pub total_messages: i64,
    pub total_appointments: i64,
    pub active_users: i64,
    pub avg_response_time: f64, // seconds, 2 decimals
    pub channel_breakdown: BTreeMap<String, i64>,
    pub appointment_status_breakdown: BTreeMap<String, i64>,
    pub daily_activity: Vec<DailyActivity>, // most recent day first
    pub monthly_trends: Vec<MonthlyTrend>,  // most recent window first
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub messages: i64,
    pub appointments: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthlyTrend {
    pub month: String, // "Jan", "Feb", ...
    pub messages: i64,
    pub appointments: i64,
}

// 2. Platform-wide dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct PlatformAnalytics {
    pub total_organizations: i64,
    pub active_organizations: i64,
    pub total_users: i64,
    pub total_messages: i64,
    pub total_appointments: i64,
    pub top_organizations: Vec<OrganizationActivity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct OrganizationActivity {
    pub id: i64,
    pub name: String,
    pub messages: i64,
    pub appointments: i64,
}

// 3. Stored metric records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MetricRecord {
    pub id: i64,
    pub organization_id: Option<i64>,
    pub metric_name: String,
    pub metric_value: f64,
    pub date: DateTime<Utc>,
    #[schema(value_type = Object)]
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MetricQuery {
    /// Only return records with this metric name.
    pub metric_name: Option<String>,
}
