// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        AnalyticsRepository, AppointmentRepository, ConfigurationRepository, DocumentRepository,
        MessageRepository, OrganizationRepository, ServiceTypeRepository, UserRepository,
    },
    services::{
        analytics_service::AnalyticsService, auth::AuthService,
        configuration_service::ConfigurationService, document_service::DocumentService,
        messaging_service::MessagingService, organization_service::OrganizationService,
        scheduling_service::SchedulingService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 168;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Process settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub jwt_expiration_hours: i64,
    pub db_max_connections: u32,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let jwt_expiration_hours = match env::var("JWT_EXPIRATION_HOURS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("JWT_EXPIRATION_HOURS is not a number: {raw}"))?,
            Err(_) => DEFAULT_JWT_EXPIRATION_HOURS,
        };

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {raw}"))?,
            Err(_) => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let cors_allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            jwt_expiration_hours,
            db_max_connections,
            cors_allowed_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shared handles for every request.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub i18n_store: Arc<I18nStore>,

    pub user_repo: UserRepository,

    pub auth_service: AuthService,
    pub organization_service: OrganizationService,
    pub configuration_service: ConfigurationService,
    pub document_service: DocumentService,
    pub scheduling_service: SchedulingService,
    pub messaging_service: MessagingService,
    pub analytics_service: AnalyticsService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("could not connect to the database")?;

        tracing::info!("✅ Database connection established");

        Ok(Self::from_pool(db_pool, config))
    }

    /// Wires the dependency graph on top of an existing pool.
    pub fn from_pool(db_pool: PgPool, config: Config) -> Self {
        // --- Repositories ---
        let user_repo = UserRepository::new(db_pool.clone());
        let org_repo = OrganizationRepository::new(db_pool.clone());
        let configuration_repo = ConfigurationRepository::new(db_pool.clone());
        let document_repo = DocumentRepository::new(db_pool.clone());
        let service_type_repo = ServiceTypeRepository::new(db_pool.clone());
        let appointment_repo = AppointmentRepository::new(db_pool.clone());
        let message_repo = MessageRepository::new(db_pool.clone());
        let analytics_repo = AnalyticsRepository::new(db_pool.clone());

        // --- Services ---
        let auth_service = AuthService::new(
            user_repo.clone(),
            config.jwt_secret.clone(),
            config.jwt_expiration_hours,
            db_pool.clone(),
        );
        let organization_service =
            OrganizationService::new(org_repo, user_repo.clone(), db_pool.clone());
        let configuration_service = ConfigurationService::new(configuration_repo);
        let document_service = DocumentService::new(document_repo);
        let scheduling_service =
            SchedulingService::new(service_type_repo, appointment_repo, db_pool.clone());
        let messaging_service = MessagingService::new(message_repo, db_pool.clone());
        let analytics_service = AnalyticsService::new(analytics_repo);

        Self {
            db_pool,
            config: Arc::new(config),
            i18n_store: Arc::new(I18nStore::default()),
            user_repo,
            auth_service,
            organization_service,
            configuration_service,
            document_service,
            scheduling_service,
            messaging_service,
            analytics_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins(" http://localhost:5173 , http://localhost:3000,"),
            ["http://localhost:5173", "http://localhost:3000"]
        );
        assert!(parse_origins("").is_empty());
    }
}
