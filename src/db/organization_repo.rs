// src/db/organization_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::organization::{Organization, UpdateOrganizationPayload},
};

#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the organization row only. Onboarding goes through
    /// `OrganizationService`, which also provisions the admin.
    pub async fn create_organization<'e, E>(
        &self,
        executor: E,
        name: &str,
        industry: Option<&str>,
    ) -> Result<Organization, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, industry, subscription_status)
            VALUES ($1, $2, 'active')
            RETURNING id, name, industry, subscription_status, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(industry)
        .fetch_one(executor)
        .await?;
        Ok(organization)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Organization>, AppError> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, industry, subscription_status, created_at, updated_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(organization)
    }

    // Platform-owner listing; tenant roles never reach this
    pub async fn list_all(&self) -> Result<Vec<Organization>, AppError> {
        let organizations = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, industry, subscription_status, created_at, updated_at
            FROM organizations
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(organizations)
    }

    /// Partial update. Returns `None` when the id does not exist.
    pub async fn update_organization(
        &self,
        id: i64,
        patch: &UpdateOrganizationPayload,
    ) -> Result<Option<Organization>, AppError> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            UPDATE organizations SET
                name = COALESCE($2, name),
                industry = COALESCE($3, industry),
                subscription_status = COALESCE($4, subscription_status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, industry, subscription_status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.industry.as_deref())
        .bind(patch.subscription_status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(organization)
    }
}
