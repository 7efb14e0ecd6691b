//! Domain service for the gadget lifecycle.
//!
//! Covers listing, creation, rename/status updates, decommissioning and
//! self-destruct.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::GadgetStatus;
use crate::models::gadget::Gadget;

/// Errors specific to gadget operations.
#[derive(Debug, Error)]
pub enum GadgetError {
    #[error("Gadget not found: {0}")]
    NotFound(String),

    #[error("Gadget is already destroyed")]
    AlreadyDestroyed,

    #[error("Cannot move gadget from {from} to {to}")]
    IllegalTransition {
        from: GadgetStatus,
        to: GadgetStatus,
    },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for GadgetError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for GadgetError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Fields a caller may change on an existing gadget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GadgetUpdate {
    pub new_name: Option<String>,
    pub status: Option<GadgetStatus>,
}

/// Domain service trait for gadgets.
#[async_trait::async_trait]
pub trait GadgetService: Send + Sync {
    /// Gadgets in `status`, or every gadget not yet decommissioned.
    async fn list(&self, status: Option<GadgetStatus>) -> Result<Vec<Gadget>, GadgetError>;

    /// Creates an `Available` gadget, picking a codename when `name` is empty.
    async fn create(&self, name: Option<String>) -> Result<Gadget, GadgetError>;

    /// Renames and/or overwrites the status of the first gadget called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::NotFound`] if no gadget has that name, and
    /// [`GadgetError::IllegalTransition`] when transitions are enforced and
    /// the new status is not reachable.
    async fn update(&self, name: &str, changes: GadgetUpdate) -> Result<Gadget, GadgetError>;

    /// Marks the first gadget called `name` as decommissioned, stamping the time.
    async fn decommission(&self, name: &str) -> Result<Gadget, GadgetError>;

    /// Destroys the gadget with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::AlreadyDestroyed`] if it is already `Destroyed`.
    async fn self_destruct(&self, id: Uuid) -> Result<Gadget, GadgetError>;
}
