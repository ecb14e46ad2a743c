// src/services/organization_service.rs

use sqlx::{PgConnection, PgPool};

use crate::{
    common::error::{AppError, Resource},
    db::{NewUser, OrganizationRepository, UserRepository},
    models::{
        auth::{Role, User, UserProfile},
        organization::{CreateOrganizationPayload, Organization, UpdateOrganizationPayload},
    },
    services::auth::hash_password,
};

#[derive(Clone)]
pub struct OrganizationService {
    org_repo: OrganizationRepository,
    user_repo: UserRepository,
    pool: PgPool, // for the onboarding transaction
}

impl OrganizationService {
    pub fn new(org_repo: OrganizationRepository, user_repo: UserRepository, pool: PgPool) -> Self {
        Self { org_repo, user_repo, pool }
    }

    /// Onboards a tenant: the organization and its first `org_admin` are
    /// created together or not at all.
    pub async fn create_organization_with_admin(
        &self,
        payload: &CreateOrganizationPayload,
    ) -> Result<Organization, AppError> {
        // 1. Hash before opening the transaction
        let password_hash = hash_password(&payload.admin_password).await?;

        // 2. Organization + admin (a duplicate email rolls both back on drop)
        let mut tx = self.pool.begin().await?;
        let (organization, admin) = self.onboard(&mut *tx, payload, &password_hash).await?;
        tx.commit().await?;

        tracing::info!(
            "🏢 Organization {} ({}) onboarded with admin {}",
            organization.id,
            organization.name,
            admin.id
        );

        Ok(organization)
    }

    /// Inserts the organization and its admin on `conn`. The caller owns the
    /// transaction and `password_hash` is the admin's already hashed password.
    pub async fn onboard(
        &self,
        conn: &mut PgConnection,
        payload: &CreateOrganizationPayload,
        password_hash: &str,
    ) -> Result<(Organization, User), AppError> {
        let organization = self
            .org_repo
            .create_organization(&mut *conn, &payload.name, payload.industry.as_deref())
            .await?;

        let admin = self
            .user_repo
            .create_user(
                &mut *conn,
                NewUser {
                    email: &payload.admin_email,
                    name: &payload.admin_name,
                    password_hash,
                    role: Role::OrgAdmin,
                    organization_id: Some(organization.id),
                },
            )
            .await?;

        Ok((organization, admin))
    }

    pub async fn get_organization(&self, id: i64) -> Result<Organization, AppError> {
        self.org_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ResourceNotFound(Resource::Organization))
    }

    pub async fn list_organizations(&self) -> Result<Vec<Organization>, AppError> {
        self.org_repo.list_all().await
    }

    pub async fn list_users(&self, organization_id: i64) -> Result<Vec<UserProfile>, AppError> {
        self.user_repo.list_by_organization(organization_id).await
    }

    pub async fn update_organization(
        &self,
        id: i64,
        patch: &UpdateOrganizationPayload,
    ) -> Result<Organization, AppError> {
        self.org_repo
            .update_organization(id, patch)
            .await?
            .ok_or(AppError::ResourceNotFound(Resource::Organization))
    }
}
