// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;

use crate::{
    common::error::{AppError, Resource},
    db::{NewUser, UserRepository},
    models::auth::{Claims, LoginUserPayload, RegisterUserPayload, Role, TokenResponse, User, UserProfile},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    token_ttl: Duration,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        jwt_secret: String,
        token_ttl_hours: i64,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            jwt_secret,
            token_ttl: Duration::hours(token_ttl_hours),
            pool,
        }
    }

    /// Public self-registration of a tenant user.
    pub async fn register_user(&self, payload: &RegisterUserPayload) -> Result<UserProfile, AppError> {
        // 1. Role rules the schema cannot express
        if payload.role == Role::PlatformOwner {
            return Err(AppError::InvalidInput(
                "the platform owner account cannot be self-registered".to_string(),
            ));
        }
        let organization_id = payload.organization_id.ok_or_else(|| {
            AppError::InvalidInput("organization_id is required for this role".to_string())
        })?;

        // 2. Hashing off the async runtime
        let password_hash = hash_password(&payload.password).await?;

        // 3. Insert (duplicate email -> 409, unknown organization -> 404)
        let user = self
            .user_repo
            .create_user(
                &self.pool,
                NewUser {
                    email: &payload.email,
                    name: &payload.name,
                    password_hash: &password_hash,
                    role: payload.role,
                    organization_id: Some(organization_id),
                },
            )
            .await?;

        tracing::info!("✅ User {} registered in organization {}", user.id, organization_id);

        self.profile(user.id).await
    }

    pub async fn login_user(&self, payload: &LoginUserPayload) -> Result<TokenResponse, AppError> {
        let Some(user) = self.user_repo.find_by_email(&payload.email).await? else {
            tracing::warn!("Login rejected: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        let password = payload.password.clone();
        let password_hash = user.password_hash.clone();

        // Verification runs on a blocking thread
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Password verification task failed: {}", e))??;

        if !is_password_valid {
            tracing::warn!("Login rejected for user {}: wrong password", user.id);
            return Err(AppError::InvalidCredentials);
        }

        // Deactivated accounts look exactly like bad credentials
        if !user.is_active {
            tracing::warn!("Login rejected for user {}: account inactive", user.id);
            return Err(AppError::InvalidCredentials);
        }

        let access_token = issue_token(user.id, &self.jwt_secret, self.token_ttl, Utc::now())?;
        let profile = self.profile(user.id).await?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: profile,
        })
    }

    /// Resolves a bearer token to an active user.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_token(token, &self.jwt_secret)?;

        match self.user_repo.find_by_id(claims.sub).await? {
            Some(user) if user.is_active => Ok(user),
            _ => Err(AppError::InvalidToken),
        }
    }

    pub async fn profile(&self, user_id: i64) -> Result<UserProfile, AppError> {
        self.user_repo
            .find_profile_by_id(user_id)
            .await?
            .ok_or(AppError::ResourceNotFound(Resource::User))
    }
}

pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Password hashing task failed: {}", e))??;
    Ok(hashed)
}

pub fn issue_token(
    user_id: i64,
    secret: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: user_id,
        exp: (now + ttl).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

// Bad signature, malformed or expired: all the same to the caller
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidToken)
}
