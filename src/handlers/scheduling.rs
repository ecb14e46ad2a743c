// src/handlers/scheduling.rs

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
    models::scheduling::{
        Appointment, CreateAppointmentPayload, CreateServiceTypePayload, ServiceType,
        UpdateAppointmentPayload, UpdateServiceTypePayload,
    },
};

#[derive(Debug, Deserialize)]
pub struct ServiceTypePath {
    service_type_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentPath {
    appointment_id: i64,
}

// =============================================================================
//  SERVICE TYPES
// =============================================================================

// GET /api/organizations/{org_id}/service-types
#[utoipa::path(
    get,
    path = "/api/organizations/{org_id}/service-types",
    tag = "Scheduling",
    params(("org_id" = i64, Path, description = "Organization id")),
    responses((status = 200, description = "Bookable services", body = Vec<ServiceType>)),
    security(("api_jwt" = []))
)]
pub async fn list_service_types(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<ReadTenantData>,
) -> Result<impl IntoResponse, ApiError> {
    let service_types = app_state
        .scheduling_service
        .list_service_types(access.organization_id())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(service_types)))
}

// POST /api/organizations/{org_id}/service-types
#[utoipa::path(
    post,
    path = "/api/organizations/{org_id}/service-types",
    tag = "Scheduling",
    request_body = CreateServiceTypePayload,
    params(("org_id" = i64, Path, description = "Organization id")),
    responses(
        (status = 201, description = "Service type created", body = ServiceType),
        (status = 400, description = "Invalid payload")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_service_type(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<WriteTenantData>,
    AppJson(payload): AppJson<CreateServiceTypePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let service_type = app_state
        .scheduling_service
        .create_service_type(access.organization_id(), &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(service_type)))
}

// PUT /api/organizations/{org_id}/service-types/{service_type_id}
#[utoipa::path(
    put,
    path = "/api/organizations/{org_id}/service-types/{service_type_id}",
    tag = "Scheduling",
    request_body = UpdateServiceTypePayload,
    params(
        ("org_id" = i64, Path, description = "Organization id"),
        ("service_type_id" = i64, Path, description = "Service type id")
    ),
    responses(
        (status = 200, description = "Service type updated", body = ServiceType),
        (status = 404, description = "No such service type in this organization")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_service_type(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<WriteTenantData>,
    Path(path): Path<ServiceTypePath>,
    AppJson(payload): AppJson<UpdateServiceTypePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let service_type = app_state
        .scheduling_service
        .update_service_type(access.organization_id(), path.service_type_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(service_type)))
}

// =============================================================================
//  APPOINTMENTS
// =============================================================================

// GET /api/organizations/{org_id}/appointments
#[utoipa::path(
    get,
    path = "/api/organizations/{org_id}/appointments",
    tag = "Scheduling",
    params(("org_id" = i64, Path, description = "Organization id")),
    responses((status = 200, description = "Appointments by date", body = Vec<Appointment>)),
    security(("api_jwt" = []))
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<ReadTenantData>,
) -> Result<impl IntoResponse, ApiError> {
    let appointments = app_state
        .scheduling_service
        .list_appointments(access.organization_id())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(appointments)))
}

// POST /api/organizations/{org_id}/appointments
#[utoipa::path(
    post,
    path = "/api/organizations/{org_id}/appointments",
    tag = "Scheduling",
    request_body = CreateAppointmentPayload,
    params(("org_id" = i64, Path, description = "Organization id")),
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Invalid payload or inactive service type"),
        (status = 404, description = "Service type not found in this organization")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<WriteTenantData>,
    AppJson(payload): AppJson<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let appointment = app_state
        .scheduling_service
        .create_appointment(access.organization_id(), &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// GET /api/organizations/{org_id}/appointments/{appointment_id}
#[utoipa::path(
    get,
    path = "/api/organizations/{org_id}/appointments/{appointment_id}",
    tag = "Scheduling",
    params(
        ("org_id" = i64, Path, description = "Organization id"),
        ("appointment_id" = i64, Path, description = "Appointment id")
    ),
    responses(
        (status = 200, description = "The appointment", body = Appointment),
        (status = 404, description = "No such appointment in this organization")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_appointment(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<ReadTenantData>,
    Path(path): Path<AppointmentPath>,
) -> Result<impl IntoResponse, ApiError> {
    let appointment = app_state
        .scheduling_service
        .get_appointment(access.organization_id(), path.appointment_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(appointment)))
}

// PUT /api/organizations/{org_id}/appointments/{appointment_id}
#[utoipa::path(
    put,
    path = "/api/organizations/{org_id}/appointments/{appointment_id}",
    tag = "Scheduling",
    request_body = UpdateAppointmentPayload,
    params(
        ("org_id" = i64, Path, description = "Organization id"),
        ("appointment_id" = i64, Path, description = "Appointment id")
    ),
    responses(
        (status = 200, description = "Appointment updated", body = Appointment),
        (status = 404, description = "No such appointment in this organization")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_appointment(
    State(app_state): State<AppState>,
    locale: Locale,
    access: OrgAccess<WriteTenantData>,
    Path(path): Path<AppointmentPath>,
    AppJson(payload): AppJson<UpdateAppointmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let appointment = app_state
        .scheduling_service
        .update_appointment(access.organization_id(), path.appointment_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(appointment)))
}
