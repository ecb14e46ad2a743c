// src/db/configuration_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::configuration::{Configuration, UpdateConfigurationPayload},
};

#[derive(Clone)]
pub struct ConfigurationRepository {
    pool: PgPool,
}

impl ConfigurationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the organization's configuration, creating an empty one on
    /// first access. The unique key on `organization_id` makes concurrent
    /// first reads converge on a single row.
    pub async fn get_or_create(&self, organization_id: i64) -> Result<Configuration, AppError> {
        sqlx::query(
            r#"
            INSERT INTO configurations (organization_id)
            VALUES ($1)
            ON CONFLICT (organization_id) DO NOTHING
            "#,
        )
        .bind(organization_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::from_constraint)?;

        let configuration = sqlx::query_as::<_, Configuration>(
            r#"
            SELECT id, organization_id, whatsapp_config, telegram_config, ai_config,
                   appointment_settings, created_at, updated_at
            FROM configurations
            WHERE organization_id = $1
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(configuration)
    }

    /// Replaces only the blobs present in `patch`.
    pub async fn update_configuration(
        &self,
        organization_id: i64,
        patch: &UpdateConfigurationPayload,
    ) -> Result<Configuration, AppError> {
        // Make sure the row exists, then patch it
        self.get_or_create(organization_id).await?;

        let configuration = sqlx::query_as::<_, Configuration>(
            r#"
            UPDATE configurations SET
                whatsapp_config = COALESCE($2, whatsapp_config),
                telegram_config = COALESCE($3, telegram_config),
                ai_config = COALESCE($4, ai_config),
                appointment_settings = COALESCE($5, appointment_settings),
                updated_at = NOW()
            WHERE organization_id = $1
            RETURNING id, organization_id, whatsapp_config, telegram_config, ai_config,
                      appointment_settings, created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(patch.whatsapp_config.clone())
        .bind(patch.telegram_config.clone())
        .bind(patch.ai_config.clone())
        .bind(patch.appointment_settings.clone())
        .fetch_one(&self.pool)
        .await?;

        Ok(configuration)
    }
}
