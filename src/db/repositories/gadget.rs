use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::GadgetStatus;
use crate::entities::{gadgets, prelude::*};
use crate::models::gadget::Gadget;

/// Repository for gadget rows
pub struct GadgetRepository {
    conn: DatabaseConnection,
}

impl GadgetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn to_active_model(gadget: &Gadget) -> gadgets::ActiveModel {
        gadgets::ActiveModel {
            id: Set(gadget.id),
            name: Set(gadget.name.clone()),
            status: Set(gadget.status),
            decommissioned_at: Set(gadget.decommissioned_at),
        }
    }

    pub async fn insert(&self, gadget: &Gadget) -> Result<Gadget> {
        let model = Self::to_active_model(gadget)
            .insert(&self.conn)
            .await
            .context("Failed to insert gadget")?;

        debug!(id = %model.id, name = %model.name, "Inserted gadget");
        Ok(Gadget::from(model))
    }

    /// Writes every column of `gadget` back to its row.
    pub async fn save(&self, gadget: &Gadget) -> Result<Gadget> {
        let model = Self::to_active_model(gadget)
            .update(&self.conn)
            .await
            .with_context(|| format!("Failed to save gadget {}", gadget.id))?;

        Ok(Gadget::from(model))
    }

    /// With a filter, gadgets in exactly that status. Without one, every
    /// gadget whose status is listed by default.
    pub async fn list(&self, status: Option<GadgetStatus>) -> Result<Vec<Gadget>> {
        let condition = status.map_or_else(
            || {
                gadgets::Column::Status.is_in(
                    GadgetStatus::ALL
                        .into_iter()
                        .filter(GadgetStatus::is_listed_by_default),
                )
            },
            |status| gadgets::Column::Status.eq(status),
        );

        let rows = Gadgets::find()
            .filter(condition)
            .all(&self.conn)
            .await
            .context("Failed to list gadgets")?;

        Ok(rows.into_iter().map(Gadget::from).collect())
    }

    /// First gadget carrying `name`. Names are not unique.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Gadget>> {
        let row = Gadgets::find()
            .filter(gadgets::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query gadget by name")?;

        Ok(row.map(Gadget::from))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Gadget>> {
        let row = Gadgets::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query gadget by id")?;

        Ok(row.map(Gadget::from))
    }
}
