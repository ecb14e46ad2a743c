// src/models/document.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "document_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
    Url,
}

// Processing is driven by an external ingestion worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "document_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Processing,
    Processed,
    Error,
}

// Knowledge-base entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Document {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub file_path: Option<String>,
    pub url: Option<String>,
    pub size: Option<i64>,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDocumentPayload {
    #[validate(length(min = 1, max = 255, message = "The document name is required."))]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: DocumentKind,

    #[validate(length(max = 500))]
    pub file_path: Option<String>,

    #[validate(url(message = "The URL is invalid."), length(max = 500))]
    pub url: Option<String>,

    #[validate(range(min = 0, message = "The size cannot be negative."))]
    pub size: Option<i64>,
}

impl CreateDocumentPayload {
    /// Cross-field rule: URL documents need a source URL.
    pub fn missing_source(&self) -> Option<&'static str> {
        if self.kind == DocumentKind::Url && self.url.is_none() {
            return Some("URL documents need a source URL");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_field_uses_its_wire_name() {
        let payload: CreateDocumentPayload = serde_json::from_value(json!({
            "name": "Price list",
            "type": "pdf",
            "file_path": "/uploads/prices.pdf",
            "size": 2048,
            "organization_id": 999
        }))
        .unwrap();
        assert_eq!(payload.kind, DocumentKind::Pdf);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn url_documents_require_a_url() {
        let payload: CreateDocumentPayload = serde_json::from_value(json!({
            "name": "FAQ",
            "type": "url"
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.missing_source().is_some());
    }

    #[test]
    fn negative_size_is_rejected() {
        let payload: CreateDocumentPayload = serde_json::from_value(json!({
            "name": "notes.txt",
            "type": "txt",
            "size": -1
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("size"));
    }
}
