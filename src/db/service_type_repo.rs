// src/db/service_type_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::scheduling::{CreateServiceTypePayload, ServiceType, UpdateServiceTypePayload},
};

#[derive(Clone)]
pub struct ServiceTypeRepository {
    pool: PgPool,
}

impl ServiceTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_service_type<'e, E>(
        &self,
        executor: E,
        organization_id: i64,
        input: &CreateServiceTypePayload,
    ) -> Result<ServiceType, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ServiceType>(
            r#"
            INSERT INTO service_types (organization_id, name, description, duration, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, organization_id, name, description, duration, price, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.duration)
        .bind(input.price)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_constraint)
    }

    /// Tenant-scoped lookup: an id from another organization yields `None`.
    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        organization_id: i64,
        id: i64,
    ) -> Result<Option<ServiceType>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let service_type = sqlx::query_as::<_, ServiceType>(
            r#"
            SELECT id, organization_id, name, description, duration, price, is_active,
                   created_at, updated_at
            FROM service_types
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(executor)
        .await?;
        Ok(service_type)
    }

    pub async fn list_by_organization(&self, organization_id: i64) -> Result<Vec<ServiceType>, AppError> {
        let service_types = sqlx::query_as::<_, ServiceType>(
            r#"
            SELECT id, organization_id, name, description, duration, price, is_active,
                   created_at, updated_at
            FROM service_types
            WHERE organization_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(service_types)
    }

    /// Partial update; deactivation goes through here too (no deletes).
    pub async fn update_service_type(
        &self,
        organization_id: i64,
        id: i64,
        patch: &UpdateServiceTypePayload,
    ) -> Result<Option<ServiceType>, AppError> {
        let service_type = sqlx::query_as::<_, ServiceType>(
            r#"
            UPDATE service_types SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                duration = COALESCE($5, duration),
                price = COALESCE($6, price),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $1 AND organization_id = $2
            RETURNING id, organization_id, name, description, duration, price, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .bind(patch.name.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.duration)
        .bind(patch.price)
        .bind(patch.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_constraint)?;
        Ok(service_type)
    }
}
