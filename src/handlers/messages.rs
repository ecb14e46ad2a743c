// src/handlers/messages.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        access::{OrgAccess, ReadTenantData, WriteTenantData},
        i18n::Locale,
        json::AppJson,
    },
    models::messaging::{CreateMessagePayload, Message},
};

#[derive(Debug, Deserialize)]
pub struct MessagePath {
    message_id: i64,
}

// GET /api/organizations/{org_id}/messages
#[utoipa::path(
    get,
    path = "/api/organizations/{org_id}/messages",
    tag = "Messaging",
    params(("org_id" = i64, Path, description = "Organization id")),
    responses((status = 200, description = "Messages, oldest first", body = Vec<Message>)),
    security(("api_jwt" = []))
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<ReadTenantData>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = app_state
        .messaging_service
        .list_messages(access.organization_id())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(messages)))
}

// POST /api/organizations/{org_id}/messages
#[utoipa::path(
    post,
    path = "/api/organizations/{org_id}/messages",
    tag = "Messaging",
    request_body = CreateMessagePayload,
    params(("org_id" = i64, Path, description = "Organization id")),
    responses(
        (status = 201, description = "Message recorded", body = Message),
        (status = 400, description = "Invalid payload")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_message(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<WriteTenantData>,
    AppJson(payload): AppJson<CreateMessagePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state
        .messaging_service
        .record_message(access.organization_id(), &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(message)))
}

// GET /api/organizations/{org_id}/messages/{message_id}
#[utoipa::path(
    get,
    path = "/api/organizations/{org_id}/messages/{message_id}",
    tag = "Messaging",
    params(
        ("org_id" = i64, Path, description = "Organization id"),
        ("message_id" = i64, Path, description = "Message id")
    ),
    responses(
        (status = 200, description = "The message", body = Message),
        (status = 404, description = "No such message in this organization")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_message(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<ReadTenantData>,
    Path(path): Path<MessagePath>,
) -> Result<impl IntoResponse, ApiError> {
    let message = app_state
        .messaging_service
        .get_message(access.organization_id(), path.message_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(message)))
}
