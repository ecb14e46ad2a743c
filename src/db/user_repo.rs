// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::auth::{Role, User, UserProfile},
};

/// Row to insert. The password must already be hashed.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub organization_id: Option<i64>,
}

// All interactions with the `users` table
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, password_hash, role, organization_id,
                   is_active, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, password_hash, role, organization_id,
                   is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Public profile, including the organization name when there is one.
    pub async fn find_profile_by_id(&self, id: i64) -> Result<Option<UserProfile>, AppError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT u.id, u.email, u.name, u.role, u.organization_id,
                   o.name AS organization_name, u.is_active, u.created_at
            FROM users u
            LEFT JOIN organizations o ON o.id = u.organization_id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn list_by_organization(&self, organization_id: i64) -> Result<Vec<UserProfile>, AppError> {
        let users = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT u.id, u.email, u.name, u.role, u.organization_id,
                   o.name AS organization_name, u.is_active, u.created_at
            FROM users u
            JOIN organizations o ON o.id = u.organization_id
            WHERE u.organization_id = $1
            ORDER BY u.id ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    // Accepts a pool or a transaction so onboarding can create the admin
    // inside the organization's transaction.
    pub async fn create_user<'e, E>(&self, executor: E, new_user: NewUser<'_>) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password_hash, role, organization_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, name, password_hash, role, organization_id,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(new_user.email)
        .bind(new_user.name)
        .bind(new_user.password_hash)
        .bind(new_user.role)
        .bind(new_user.organization_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_constraint)
    }
}
