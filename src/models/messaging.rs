// src/models/messaging.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "message_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    Document,
}

// A message exchanged with a customer on some channel
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Message {
    pub id: i64,
    pub organization_id: i64,
    pub customer_id: String, // id on the external channel, not a foreign key
    pub channel: String,
    pub message_type: MessageType,
    pub content: String,
    pub is_from_customer: bool,
    pub response_time: Option<f64>, // seconds
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMessagePayload {
    #[validate(length(min = 1, max = 255, message = "The customer id is required."))]
    pub customer_id: String,

    #[validate(length(min = 1, max = 50, message = "The channel is required."))]
    #[schema(example = "whatsapp")]
    pub channel: String,

    pub content: String,

    #[serde(default)]
    pub message_type: MessageType,

    #[serde(default = "default_from_customer")]
    pub is_from_customer: bool,

    #[validate(range(min = 0.0, message = "The response time cannot be negative."))]
    pub response_time: Option<f64>,
}

fn default_from_customer() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_an_inbound_text_message() {
        let payload: CreateMessagePayload = serde_json::from_value(json!({
            "customer_id": "4821",
            "channel": "telegram",
            "content": "Namaste"
        }))
        .unwrap();
        assert_eq!(payload.message_type, MessageType::Text);
        assert!(payload.is_from_customer);
        assert!(payload.response_time.is_none());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn negative_response_time_is_rejected() {
        let payload: CreateMessagePayload = serde_json::from_value(json!({
            "customer_id": "4821",
            "channel": "whatsapp",
            "content": "ok",
            "is_from_customer": false,
            "response_time": -2.5
        }))
        .unwrap();
        assert!(payload.validate().is_err());
    }
}
