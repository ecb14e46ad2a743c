// src/handlers/configuration.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        access::{OrgAccess, ReadTenantData, WriteTenantData},
        i18n::Locale,
        json::AppJson,
    },
    models::configuration::{Configuration, UpdateConfigurationPayload},
};

// GET /api/organizations/{org_id}/config
#[utoipa::path(
    get,
    path = "/api/organizations/{org_id}/config",
    tag = "Configuration",
    params(("org_id" = i64, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Channel and assistant settings (created empty on first read)", body = Configuration)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_configuration(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<ReadTenantData>,
) -> Result<impl IntoResponse, ApiError> {
    let configuration = app_state
        .configuration_service
        .get_configuration(access.organization_id())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(configuration)))
}

// PUT /api/organizations/{org_id}/config
#[utoipa::path(
    put,
    path = "/api/organizations/{org_id}/config",
    tag = "Configuration",
    request_body = UpdateConfigurationPayload,
    params(("org_id" = i64, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Configuration after the update", body = Configuration),
        (status = 400, description = "A supplied blob is not a JSON object")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_configuration(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<WriteTenantData>,
    AppJson(payload): AppJson<UpdateConfigurationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let configuration = app_state
        .configuration_service
        .update_configuration(access.organization_id(), &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(configuration)))
}
