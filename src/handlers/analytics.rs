// src/handlers/analytics.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        access::{OrgAccess, PlatformAccess, ReadTenantData, ViewPlatformAnalytics},
        i18n::Locale,
    },
    models::analytics::{MetricQuery, MetricRecord, OrganizationAnalytics, PlatformAnalytics},
};

// GET /api/organizations/{org_id}/analytics
#[utoipa::path(
    get,
    path = "/api/organizations/{org_id}/analytics",
    tag = "Analytics",
    params(("org_id" = i64, Path, description = "Organization id")),
    responses((status = 200, description = "Organization dashboard", body = OrganizationAnalytics)),
    security(("api_jwt" = []))
)]
pub async fn get_organization_analytics(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<ReadTenantData>,
) -> Result<impl IntoResponse, ApiError> {
    let analytics = app_state
        .analytics_service
        .organization_analytics(access.organization_id(), Utc::now())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(analytics)))
}

// GET /api/organizations/{org_id}/metrics
#[utoipa::path(
    get,
    path = "/api/organizations/{org_id}/metrics",
    tag = "Analytics",
    params(
        ("org_id" = i64, Path, description = "Organization id"),
        MetricQuery
    ),
    responses((status = 200, description = "Stored metric records, newest first", body = Vec<MetricRecord>)),
    security(("api_jwt" = []))
)]
pub async fn list_metrics(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<ReadTenantData>,
    Query(query): Query<MetricQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let records = app_state
        .analytics_service
        .list_metrics(access.organization_id(), query.metric_name.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(records)))
}

// GET /api/analytics/platform
#[utoipa::path(
    get,
    path = "/api/analytics/platform",
    tag = "Analytics",
    responses(
        (status = 200, description = "Platform-wide dashboard", body = PlatformAnalytics),
        (status = 403, description = "Platform owner only")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_platform_analytics(
    State(app_state): State<AppState>,
    locale: Locale,
    _access: PlatformAccess<ViewPlatformAnalytics>,
) -> Result<impl IntoResponse, ApiError> {
    let analytics = app_state
        .analytics_service
        .platform_analytics()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(analytics)))
}
