// src/handlers/organizations.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        access::{
            CreateOrganization, ListOrganizations, OrgAccess, PlatformAccess, ReadOrganization,
            ReadTenantData, UpdateOrganization,
        },
        i18n::Locale,
        json::AppJson,
    },
    models::{
        auth::UserProfile,
        organization::{CreateOrganizationPayload, Organization, UpdateOrganizationPayload},
    },
};

// GET /api/organizations
#[utoipa::path(
    get,
    path = "/api/organizations",
    tag = "Organizations",
    responses(
        (status = 200, description = "Every organization on the platform", body = Vec<Organization>),
        (status = 403, description = "Platform owner only")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_organizations(
    State(app_state): State<AppState>,
    locale: Locale,
    _access: PlatformAccess<ListOrganizations>,
) -> Result<impl IntoResponse, ApiError> {
    let organizations = app_state
        .organization_service
        .list_organizations()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(organizations)))
}

// POST /api/organizations
#[utoipa::path(
    post,
    path = "/api/organizations",
    tag = "Organizations",
    request_body = CreateOrganizationPayload,
    responses(
        (status = 201, description = "Organization created together with its admin", body = Organization),
        (status = 403, description = "Platform owner only"),
        (status = 409, description = "Admin email already registered")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_organization(
    State(app_state): State<AppState>,
    locale: Locale,
    _access: PlatformAccess<CreateOrganization>,
    AppJson(payload): AppJson<CreateOrganizationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let organization = app_state
        .organization_service
        .create_organization_with_admin(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(organization)))
}

// GET /api/organizations/{org_id}
#[utoipa::path(
    get,
    path = "/api/organizations/{org_id}",
    tag = "Organizations",
    params(("org_id" = i64, Path, description = "Organization id")),
    responses(
        (status = 200, description = "The organization", body = Organization),
        (status = 403, description = "Another tenant's organization"),
        (status = 404, description = "Organization not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_organization(access: OrgAccess<ReadOrganization>) -> impl IntoResponse {
    // The extractor already loaded it
    (StatusCode::OK, Json(access.organization))
}

// PUT /api/organizations/{org_id}
#[utoipa::path(
    put,
    path = "/api/organizations/{org_id}",
    tag = "Organizations",
    request_body = UpdateOrganizationPayload,
    params(("org_id" = i64, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Organization updated", body = Organization),
        (status = 403, description = "Only the platform owner or the org admin"),
        (status = 404, description = "Organization not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_organization(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<UpdateOrganization>,
    AppJson(payload): AppJson<UpdateOrganizationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let organization = app_state
        .organization_service
        .update_organization(access.organization_id(), &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(organization)))
}

// GET /api/organizations/{org_id}/users
#[utoipa::path(
    get,
    path = "/api/organizations/{org_id}/users",
    tag = "Organizations",
    params(("org_id" = i64, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Users of the organization", body = Vec<UserProfile>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_organization_users(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<ReadTenantData>,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .organization_service
        .list_users(access.organization_id())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(users)))
}
