// src/db/message_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::messaging::{CreateMessagePayload, Message},
};

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_message<'e, E>(
        &self,
        executor: E,
        organization_id: i64,
        input: &CreateMessagePayload,
    ) -> Result<Message, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (
                organization_id, customer_id, channel, message_type, content,
                is_from_customer, response_time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, organization_id, customer_id, channel, message_type, content,
                      is_from_customer, response_time, created_at
            "#,
        )
        .bind(organization_id)
        .bind(&input.customer_id)
        .bind(&input.channel)
        .bind(input.message_type)
        .bind(&input.content)
        .bind(input.is_from_customer)
        .bind(input.response_time)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_constraint)
    }

    pub async fn find_by_id(&self, organization_id: i64, id: i64) -> Result<Option<Message>, AppError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, organization_id, customer_id, channel, message_type, content,
                   is_from_customer, response_time, created_at
            FROM messages
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(message)
    }

    // Oldest first, the order a conversation is read in
    pub async fn list_by_organization(&self, organization_id: i64) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, organization_id, customer_id, channel, message_type, content,
                   is_from_customer, response_time, created_at
            FROM messages
            WHERE organization_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }
}
