// src/models/configuration.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

// One row per organization. The blobs stay schema-less until each channel
// integration defines its own shape.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Configuration {
    pub id: i64,
    pub organization_id: i64,

    #[schema(value_type = Object)]
    pub whatsapp_config: Value,
    #[schema(value_type = Object)]
    pub telegram_config: Value,
    #[schema(value_type = Object)]
    pub ai_config: Value,
    #[schema(value_type = Object)]
    pub appointment_settings: Value,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update: absent blobs keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateConfigurationPayload {
    #[schema(value_type = Option<Object>)]
    pub whatsapp_config: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub telegram_config: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub ai_config: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub appointment_settings: Option<Value>,
}

impl UpdateConfigurationPayload {
    /// Every blob present in the payload must be a JSON object.
    pub fn non_object_field(&self) -> Option<&'static str> {
        [
            ("whatsapp_config", &self.whatsapp_config),
            ("telegram_config", &self.telegram_config),
            ("ai_config", &self.ai_config),
            ("appointment_settings", &self.appointment_settings),
        ]
        .into_iter()
        .find(|(_, value)| matches!(value, Some(v) if !v.is_object()))
        .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_supplied_blobs_are_present() {
        let payload: UpdateConfigurationPayload =
            serde_json::from_value(json!({ "ai_config": { "tone": "formal" } })).unwrap();
        assert!(payload.whatsapp_config.is_none());
        assert!(payload.telegram_config.is_none());
        assert!(payload.appointment_settings.is_none());
        assert_eq!(payload.ai_config, Some(json!({ "tone": "formal" })));
        assert_eq!(payload.non_object_field(), None);
    }

    #[test]
    fn scalar_blobs_are_flagged() {
        let payload: UpdateConfigurationPayload =
            serde_json::from_value(json!({ "telegram_config": "token" })).unwrap();
        assert_eq!(payload.non_object_field(), Some("telegram_config"));
    }
}
