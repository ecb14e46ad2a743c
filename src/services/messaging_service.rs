// src/services/messaging_service.rs

use sqlx::PgPool;

use crate::{
    common::error::{AppError, Resource},
    db::MessageRepository,
    models::messaging::{CreateMessagePayload, Message},
};

#[derive(Clone)]
pub struct MessagingService {
    repo: MessageRepository,
    pool: PgPool,
}

impl MessagingService {
    pub fn new(repo: MessageRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn record_message(
        &self,
        organization_id: i64,
        payload: &CreateMessagePayload,
    ) -> Result<Message, AppError> {
        self.repo.create_message(&self.pool, organization_id, payload).await
    }

    pub async fn get_message(&self, organization_id: i64, message_id: i64) -> Result<Message, AppError> {
        self.repo
            .find_by_id(organization_id, message_id)
            .await?
            .ok_or(AppError::ResourceNotFound(Resource::Message))
    }

    pub async fn list_messages(&self, organization_id: i64) -> Result<Vec<Message>, AppError> {
        self.repo.list_by_organization(organization_id).await
    }
}
