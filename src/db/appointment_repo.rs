// src/db/appointment_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::scheduling::{Appointment, CreateAppointmentPayload, UpdateAppointmentPayload},
};

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Status starts at 'scheduled' (column default)
    pub async fn create_appointment<'e, E>(
        &self,
        executor: E,
        organization_id: i64,
        input: &CreateAppointmentPayload,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (
                organization_id, service_type_id, customer_name, customer_email,
                customer_phone, appointment_date, channel, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, organization_id, service_type_id, customer_name, customer_email,
                      customer_phone, appointment_date, status, channel, notes,
                      created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(input.service_type_id)
        .bind(&input.customer_name)
        .bind(input.customer_email.as_deref())
        .bind(input.customer_phone.as_deref())
        .bind(input.appointment_date)
        .bind(input.channel.as_deref())
        .bind(input.notes.as_deref())
        .fetch_one(executor)
        .await
        .map_err(AppError::from_constraint)
    }

    pub async fn find_by_id(&self, organization_id: i64, id: i64) -> Result<Option<Appointment>, AppError> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, organization_id, service_type_id, customer_name, customer_email,
                   customer_phone, appointment_date, status, channel, notes,
                   created_at, updated_at
            FROM appointments
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(appointment)
    }

    pub async fn list_by_organization(&self, organization_id: i64) -> Result<Vec<Appointment>, AppError> {
        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, organization_id, service_type_id, customer_name, customer_email,
                   customer_phone, appointment_date, status, channel, notes,
                   created_at, updated_at
            FROM appointments
            WHERE organization_id = $1
            ORDER BY appointment_date ASC, id ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(appointments)
    }

    pub async fn update_appointment<'e, E>(
        &self,
        executor: E,
        organization_id: i64,
        id: i64,
        patch: &UpdateAppointmentPayload,
    ) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments SET
                appointment_date = COALESCE($3, appointment_date),
                status = COALESCE($4, status),
                notes = COALESCE($5, notes),
                updated_at = NOW()
            WHERE id = $1 AND organization_id = $2
            RETURNING id, organization_id, service_type_id, customer_name, customer_email,
                      customer_phone, appointment_date, status, channel, notes,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .bind(patch.appointment_date)
        .bind(patch.status)
        .bind(patch.notes.as_deref())
        .fetch_optional(executor)
        .await?;
        Ok(appointment)
    }
}
