// src/db/analytics_repo.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::analytics::{MetricRecord, OrganizationActivity},
};

/// Raw figures for one organization, read from a single snapshot.
/// Time bucketing happens in the service layer.
#[derive(Debug, Default)]
pub struct OrganizationSnapshot {
    pub total_messages: i64,
    pub total_appointments: i64,
    pub active_users: i64,
    pub avg_response_time: Option<f64>,
    pub channel_breakdown: BTreeMap<String, i64>,
    pub appointment_status_breakdown: BTreeMap<String, i64>,
    pub message_timestamps: Vec<DateTime<Utc>>,
    pub appointment_timestamps: Vec<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct PlatformSnapshot {
    pub total_organizations: i64,
    pub active_organizations: i64,
    pub total_users: i64,
    pub total_messages: i64,
    pub total_appointments: i64,
    pub activity: Vec<OrganizationActivity>, // ordered by organization id
}

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Organization snapshot
    pub async fn organization_snapshot(
        &self,
        organization_id: i64,
        since: DateTime<Utc>,
    ) -> Result<OrganizationSnapshot, AppError> {
        // One transaction so every figure sees the same data
        let mut tx = self.pool.begin().await?;

        // A. Totals
        let total_messages: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE organization_id = $1")
                .bind(organization_id)
                .fetch_one(&mut *tx)
                .await?;

        let total_appointments: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM appointments WHERE organization_id = $1")
                .bind(organization_id)
                .fetch_one(&mut *tx)
                .await?;

        let active_users: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE organization_id = $1 AND is_active = TRUE",
        )
        .bind(organization_id)
        .fetch_one(&mut *tx)
        .await?;

        // B. Mean response time (NULL when nothing was answered)
        let avg_response_time: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT AVG(response_time)
            FROM messages
            WHERE organization_id = $1 AND response_time IS NOT NULL
            "#,
        )
        .bind(organization_id)
        .fetch_one(&mut *tx)
        .await?;

        // C. Breakdowns
        let channel_breakdown = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT channel, COUNT(*)
            FROM messages
            WHERE organization_id = $1
            GROUP BY channel
            "#,
        )
        .bind(organization_id)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .collect();

        let appointment_status_breakdown = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT status::text, COUNT(*)
            FROM appointments
            WHERE organization_id = $1
            GROUP BY status
            "#,
        )
        .bind(organization_id)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .collect();

        // D. Creation timestamps for the daily and monthly series
        let message_timestamps = Self::created_since(&mut *tx, "messages", organization_id, since).await?;
        let appointment_timestamps =
            Self::created_since(&mut *tx, "appointments", organization_id, since).await?;

        tx.commit().await?;

        Ok(OrganizationSnapshot {
            total_messages,
            total_appointments,
            active_users,
            avg_response_time,
            channel_breakdown,
            appointment_status_breakdown,
            message_timestamps,
            appointment_timestamps,
        })
    }

    // `table` is always one of our own literals, never user input
    async fn created_since<'e, E>(
        executor: E,
        table: &'static str,
        organization_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT created_at FROM {table} WHERE organization_id = $1 AND created_at >= $2"
        );
        let timestamps = sqlx::query_scalar::<_, DateTime<Utc>>(&sql)
            .bind(organization_id)
            .bind(since)
            .fetch_all(executor)
            .await?;
        Ok(timestamps)
    }

    // 2. Platform snapshot
    pub async fn platform_snapshot(&self) -> Result<PlatformSnapshot, AppError> {
        let mut tx = self.pool.begin().await?;

        let total_organizations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM organizations")
            .fetch_one(&mut *tx)
            .await?;

        let active_organizations: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM organizations WHERE subscription_status = 'active'",
        )
        .fetch_one(&mut *tx)
        .await?;

        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;

        let total_messages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&mut *tx)
            .await?;

        let total_appointments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
            .fetch_one(&mut *tx)
            .await?;

        // One row per organization, idle ones included
        let activity = sqlx::query_as::<_, OrganizationActivity>(
            r#"
            SELECT
                o.id,
                o.name,
                (SELECT COUNT(*) FROM messages m WHERE m.organization_id = o.id) AS messages,
                (SELECT COUNT(*) FROM appointments a WHERE a.organization_id = o.id) AS appointments
            FROM organizations o
            ORDER BY o.id ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(PlatformSnapshot {
            total_organizations,
            active_organizations,
            total_users,
            total_messages,
            total_appointments,
            activity,
        })
    }

    // 3. Stored metric records
    pub async fn list_metrics(
        &self,
        organization_id: i64,
        metric_name: Option<&str>,
    ) -> Result<Vec<MetricRecord>, AppError> {
        let records = sqlx::query_as::<_, MetricRecord>(
            r#"
            SELECT id, organization_id, metric_name, metric_value, date, metadata, created_at
            FROM analytics
            WHERE organization_id = $1
              AND ($2::text IS NULL OR metric_name = $2)
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(organization_id)
        .bind(metric_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    pub async fn record_metric<'e, E>(
        &self,
        executor: E,
        organization_id: Option<i64>,
        metric_name: &str,
        metric_value: f64,
        date: DateTime<Utc>,
        metadata: Value,
    ) -> Result<MetricRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, MetricRecord>(
            r#"
            INSERT INTO analytics (organization_id, metric_name, metric_value, date, metadata)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, organization_id, metric_name, metric_value, date, metadata, created_at
            "#,
        )
        .bind(organization_id)
        .bind(metric_name)
        .bind(metric_value)
        .bind(date)
        .bind(metadata)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_constraint)
    }
}
