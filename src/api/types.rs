use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::GadgetStatus;
use crate::models::gadget::Gadget;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            details: None,
        }
    }

    pub fn with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            details: Some(details.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Gadgets
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GadgetDto {
    pub id: Uuid,
    pub name: String,
    pub status: GadgetStatus,
    #[serde(rename = "decommissionedAt")]
    pub decommissioned_at: Option<DateTime<Utc>>,
}

impl From<Gadget> for GadgetDto {
    fn from(gadget: Gadget) -> Self {
        Self {
            id: gadget.id,
            name: gadget.name,
            status: gadget.status,
            decommissioned_at: gadget.decommissioned_at,
        }
    }
}

/// A listed gadget with its freshly rolled success odds.
#[derive(Debug, Serialize)]
pub struct GadgetListItem {
    #[serde(flatten)]
    pub gadget: GadgetDto,
    pub mission_success_probability: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListGadgetsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GadgetNameQuery {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateGadgetRequest {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGadgetRequest {
    pub new_name: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GadgetMessageResponse {
    pub message: String,
    pub gadget: GadgetDto,
}

#[derive(Debug, Serialize)]
pub struct SelfDestructResponse {
    pub success: bool,
    pub message: String,
    pub confirmation_code: String,
}

// ============================================================================
// System
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
    pub uptime_seconds: u64,
}
