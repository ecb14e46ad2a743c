// src/services/scheduling_service.rs

use sqlx::PgPool;

use crate::{
    common::error::{AppError, Resource},
    db::{AppointmentRepository, ServiceTypeRepository},
    models::scheduling::{
        Appointment, CreateAppointmentPayload, CreateServiceTypePayload, ServiceType,
        UpdateAppointmentPayload, UpdateServiceTypePayload,
    },
};

#[derive(Clone)]
pub struct SchedulingService {
    service_type_repo: ServiceTypeRepository,
    appointment_repo: AppointmentRepository,
    pool: PgPool,
}

impl SchedulingService {
    pub fn new(
        service_type_repo: ServiceTypeRepository,
        appointment_repo: AppointmentRepository,
        pool: PgPool,
    ) -> Self {
        Self { service_type_repo, appointment_repo, pool }
    }

    // =========================================================================
    //  SERVICE TYPES
    // =========================================================================

    pub async fn create_service_type(
        &self,
        organization_id: i64,
        payload: &CreateServiceTypePayload,
    ) -> Result<ServiceType, AppError> {
        self.service_type_repo
            .create_service_type(&self.pool, organization_id, payload)
            .await
    }

    pub async fn list_service_types(&self, organization_id: i64) -> Result<Vec<ServiceType>, AppError> {
        self.service_type_repo.list_by_organization(organization_id).await
    }

    pub async fn update_service_type(
        &self,
        organization_id: i64,
        service_type_id: i64,
        patch: &UpdateServiceTypePayload,
    ) -> Result<ServiceType, AppError> {
        self.service_type_repo
            .update_service_type(organization_id, service_type_id, patch)
            .await?
            .ok_or(AppError::ResourceNotFound(Resource::ServiceType))
    }

    // =========================================================================
    //  APPOINTMENTS
    // =========================================================================

    /// Books an appointment. The service type must belong to the same
    /// organization and still be offered.
    pub async fn create_appointment(
        &self,
        organization_id: i64,
        payload: &CreateAppointmentPayload,
    ) -> Result<Appointment, AppError> {
        // 1. Check and insert under one transaction
        let mut tx = self.pool.begin().await?;

        // 2. Ownership: a foreign service type reads as missing
        let service_type = self
            .service_type_repo
            .find_by_id(&mut *tx, organization_id, payload.service_type_id)
            .await?
            .ok_or(AppError::ResourceNotFound(Resource::ServiceType))?;

        // 3. Availability
        if !service_type.is_active {
            return Err(AppError::InactiveServiceType);
        }

        // 4. Insert
        let appointment = self
            .appointment_repo
            .create_appointment(&mut *tx, organization_id, payload)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "📅 Appointment {} booked for organization {} ({})",
            appointment.id,
            organization_id,
            service_type.name
        );

        Ok(appointment)
    }

    pub async fn list_appointments(&self, organization_id: i64) -> Result<Vec<Appointment>, AppError> {
        self.appointment_repo.list_by_organization(organization_id).await
    }

    pub async fn get_appointment(
        &self,
        organization_id: i64,
        appointment_id: i64,
    ) -> Result<Appointment, AppError> {
        self.appointment_repo
            .find_by_id(organization_id, appointment_id)
            .await?
            .ok_or(AppError::ResourceNotFound(Resource::Appointment))
    }

    pub async fn update_appointment(
        &self,
        organization_id: i64,
        appointment_id: i64,
        patch: &UpdateAppointmentPayload,
    ) -> Result<Appointment, AppError> {
        self.appointment_repo
            .update_appointment(&self.pool, organization_id, appointment_id, patch)
            .await?
            .ok_or(AppError::ResourceNotFound(Resource::Appointment))
    }
}
