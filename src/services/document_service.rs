// src/services/document_service.rs

use crate::{
    common::error::{AppError, Resource},
    db::DocumentRepository,
    models::document::{CreateDocumentPayload, Document},
};

#[derive(Clone)]
pub struct DocumentService {
    repo: DocumentRepository,
}

impl DocumentService {
    pub fn new(repo: DocumentRepository) -> Self {
        Self { repo }
    }

    pub async fn create_document(
        &self,
        organization_id: i64,
        payload: &CreateDocumentPayload,
    ) -> Result<Document, AppError> {
        if let Some(reason) = payload.missing_source() {
            return Err(AppError::InvalidInput(reason.to_string()));
        }

        let document = self.repo.create_document(organization_id, payload).await?;
        tracing::info!(
            "📄 Document {} queued for processing in organization {}",
            document.id,
            organization_id
        );
        Ok(document)
    }

    pub async fn list_documents(&self, organization_id: i64) -> Result<Vec<Document>, AppError> {
        self.repo.list_by_organization(organization_id).await
    }

    pub async fn get_document(&self, organization_id: i64, document_id: i64) -> Result<Document, AppError> {
        self.repo
            .find_by_id(organization_id, document_id)
            .await?
            .ok_or(AppError::ResourceNotFound(Resource::Document))
    }

    /// A document of another organization is reported as missing and left untouched.
    pub async fn delete_document(&self, organization_id: i64, document_id: i64) -> Result<(), AppError> {
        if !self.repo.delete_document(organization_id, document_id).await? {
            return Err(AppError::ResourceNotFound(Resource::Document));
        }
        Ok(())
    }
}
