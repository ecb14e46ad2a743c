// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        access::{OrgAccess, ReadTenantData, WriteTenantData},
        i18n::Locale,
        json::AppJson,
    },
    models::document::{CreateDocumentPayload, Document},
};

#[derive(Debug, Deserialize)]
pub struct DocumentPath {
    doc_id: i64,
}

// GET /api/organizations/{org_id}/documents
#[utoipa::path(
    get,
    path = "/api/organizations/{org_id}/documents",
    tag = "Knowledge Base",
    params(("org_id" = i64, Path, description = "Organization id")),
    responses((status = 200, description = "Knowledge-base documents", body = Vec<Document>)),
    security(("api_jwt" = []))
)]
pub async fn list_documents(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<ReadTenantData>,
) -> Result<impl IntoResponse, ApiError> {
    let documents = app_state
        .document_service
        .list_documents(access.organization_id())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(documents)))
}

// POST /api/organizations/{org_id}/documents
#[utoipa::path(
    post,
    path = "/api/organizations/{org_id}/documents",
    tag = "Knowledge Base",
    request_body = CreateDocumentPayload,
    params(("org_id" = i64, Path, description = "Organization id")),
    responses(
        (status = 201, description = "Document registered, status `processing`", body = Document),
        (status = 400, description = "Invalid payload")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_document(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<WriteTenantData>,
    AppJson(payload): AppJson<CreateDocumentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let document = app_state
        .document_service
        .create_document(access.organization_id(), &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(document)))
}

// GET /api/organizations/{org_id}/documents/{doc_id}
#[utoipa::path(
    get,
    path = "/api/organizations/{org_id}/documents/{doc_id}",
    tag = "Knowledge Base",
    params(
        ("org_id" = i64, Path, description = "Organization id"),
        ("doc_id" = i64, Path, description = "Document id")
    ),
    responses(
        (status = 200, description = "The document", body = Document),
        (status = 404, description = "No such document in this organization")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_document(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<ReadTenantData>,
    Path(path): Path<DocumentPath>,
) -> Result<impl IntoResponse, ApiError> {
    let document = app_state
        .document_service
        .get_document(access.organization_id(), path.doc_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(document)))
}

// DELETE /api/organizations/{org_id}/documents/{doc_id}
#[utoipa::path(
    delete,
    path = "/api/organizations/{org_id}/documents/{doc_id}",
    tag = "Knowledge Base",
    params(
        ("org_id" = i64, Path, description = "Organization id"),
        ("doc_id" = i64, Path, description = "Document id")
    ),
    responses(
        (status = 200, description = "Document deleted"),
        (status = 404, description = "No such document in this organization")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_document(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<WriteTenantData>,
    Path(path): Path<DocumentPath>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .document_service
        .delete_document(access.organization_id(), path.doc_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(json!({ "message": "Document deleted successfully" }))))
}
