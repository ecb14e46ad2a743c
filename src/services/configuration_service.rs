// src/services/configuration_service.rs

use crate::{
    common::error::AppError,
    db::ConfigurationRepository,
    models::configuration::{Configuration, UpdateConfigurationPayload},
};

#[derive(Clone)]
pub struct ConfigurationService {
    repo: ConfigurationRepository,
}

impl ConfigurationService {
    pub fn new(repo: ConfigurationRepository) -> Self {
        Self { repo }
    }

    pub async fn get_configuration(&self, organization_id: i64) -> Result<Configuration, AppError> {
        self.repo.get_or_create(organization_id).await
    }

    pub async fn update_configuration(
        &self,
        organization_id: i64,
        patch: &UpdateConfigurationPayload,
    ) -> Result<Configuration, AppError> {
        if let Some(field) = patch.non_object_field() {
            return Err(AppError::InvalidInput(format!("{field} must be a JSON object")));
        }
        self.repo.update_configuration(organization_id, patch).await
    }
}
