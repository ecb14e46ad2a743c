// src/db/document_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::document::{CreateDocumentPayload, Document},
};

#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // New documents start in `processing`
    pub async fn create_document(
        &self,
        organization_id: i64,
        input: &CreateDocumentPayload,
    ) -> Result<Document, AppError> {
        sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (organization_id, name, kind, file_path, url, size)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, organization_id, name, kind, file_path, url, size, status,
                      created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(&input.name)
        .bind(input.kind)
        .bind(input.file_path.as_deref())
        .bind(input.url.as_deref())
        .bind(input.size)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_constraint)
    }

    pub async fn find_by_id(&self, organization_id: i64, id: i64) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            SELECT id, organization_id, name, kind, file_path, url, size, status,
                   created_at, updated_at
            FROM documents
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(document)
    }

    pub async fn list_by_organization(&self, organization_id: i64) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            r#"
            SELECT id, organization_id, name, kind, file_path, url, size, status,
                   created_at, updated_at
            FROM documents
            WHERE organization_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    /// Deletes by id *and* organization. Returns `false` when nothing
    /// matched, including ids that belong to another organization.
    pub async fn delete_document(&self, organization_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
