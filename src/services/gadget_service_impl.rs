//! `SeaORM` implementation of the `GadgetService` trait.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::db::Store;
use crate::domain::{GadgetStatus, flair};
use crate::models::gadget::Gadget;
use crate::services::gadget_service::{GadgetError, GadgetService, GadgetUpdate};

pub struct SeaOrmGadgetService {
    store: Store,
    enforce_transitions: bool,
}

impl SeaOrmGadgetService {
    #[must_use]
    pub const fn new(store: Store, enforce_transitions: bool) -> Self {
        Self {
            store,
            enforce_transitions,
        }
    }

    async fn find_named(&self, name: &str) -> Result<Gadget, GadgetError> {
        self.store
            .find_gadget_by_name(name)
            .await?
            .ok_or_else(|| GadgetError::NotFound(name.to_string()))
    }
}

#[async_trait]
impl GadgetService for SeaOrmGadgetService {
    async fn list(&self, status: Option<GadgetStatus>) -> Result<Vec<Gadget>, GadgetError> {
        Ok(self.store.list_gadgets(status).await?)
    }

    async fn create(&self, name: Option<String>) -> Result<Gadget, GadgetError> {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| flair::random_codename(&mut rand::rng()).to_string());

        let gadget = self.store.insert_gadget(&Gadget::new(name)).await?;
        info!(id = %gadget.id, name = %gadget.name, "Created gadget");
        Ok(gadget)
    }

    async fn update(&self, name: &str, changes: GadgetUpdate) -> Result<Gadget, GadgetError> {
        let mut gadget = self.find_named(name).await?;

        if let Some(new_name) = changes.new_name.filter(|n| !n.is_empty()) {
            gadget.name = new_name;
        }

        if let Some(status) = changes.status {
            if self.enforce_transitions && !gadget.status.can_transition_to(status) {
                return Err(GadgetError::IllegalTransition {
                    from: gadget.status,
                    to: status,
                });
            }
            // Reaching Decommissioned through a plain update still has to
            // record when it happened.
            if status == GadgetStatus::Decommissioned && gadget.decommissioned_at.is_none() {
                gadget.decommission(Utc::now());
            } else {
                gadget.status = status;
            }
        }

        let gadget = self.store.save_gadget(&gadget).await?;
        info!(id = %gadget.id, name = %gadget.name, status = %gadget.status, "Updated gadget");
        Ok(gadget)
    }

    async fn decommission(&self, name: &str) -> Result<Gadget, GadgetError> {
        let mut gadget = self.find_named(name).await?;
        gadget.decommission(Utc::now());

        let gadget = self.store.save_gadget(&gadget).await?;
        info!(id = %gadget.id, name = %gadget.name, "Decommissioned gadget");
        Ok(gadget)
    }

    async fn self_destruct(&self, id: Uuid) -> Result<Gadget, GadgetError> {
        let mut gadget = self
            .store
            .find_gadget_by_id(id)
            .await?
            .ok_or_else(|| GadgetError::NotFound(id.to_string()))?;

        if gadget.status == GadgetStatus::Destroyed {
            return Err(GadgetError::AlreadyDestroyed);
        }

        gadget.status = GadgetStatus::Destroyed;
        let gadget = self.store.save_gadget(&gadget).await?;
        info!(id = %gadget.id, name = %gadget.name, "Self-destruct triggered");
        Ok(gadget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service(enforce_transitions: bool) -> SeaOrmGadgetService {
        let store = Store::new("sqlite::memory:").await.unwrap();
        SeaOrmGadgetService::new(store, enforce_transitions)
    }

    #[tokio::test]
    async fn test_create_uses_codename_when_unnamed() {
        let gadgets = service(false).await;

        let unnamed = gadgets.create(None).await.unwrap();
        assert!(flair::CODENAMES.contains(&unnamed.name.as_str()));
        assert_eq!(unnamed.status, GadgetStatus::Available);

        let empty = gadgets.create(Some(String::new())).await.unwrap();
        assert!(flair::CODENAMES.contains(&empty.name.as_str()));

        let named = gadgets.create(Some("Exploding Pen".into())).await.unwrap();
        assert_eq!(named.name, "Exploding Pen");
    }

    #[tokio::test]
    async fn test_list_hides_decommissioned_by_default() {
        let gadgets = service(false).await;
        gadgets.create(Some("Watch".into())).await.unwrap();
        gadgets.create(Some("Car".into())).await.unwrap();
        gadgets.decommission("Car").await.unwrap();

        let visible = gadgets.list(None).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Watch");

        let retired = gadgets
            .list(Some(GadgetStatus::Decommissioned))
            .await
            .unwrap();
        assert_eq!(retired.len(), 1);
        assert!(retired[0].decommissioned_at.is_some());
    }

    #[tokio::test]
    async fn test_update_overwrites_status_without_enforcement() {
        let gadgets = service(false).await;
        let gadget = gadgets.create(Some("Laser".into())).await.unwrap();
        gadgets.self_destruct(gadget.id).await.unwrap();

        let revived = gadgets
            .update(
                "Laser",
                GadgetUpdate {
                    new_name: Some("Laser II".into()),
                    status: Some(GadgetStatus::Available),
                },
            )
            .await
            .unwrap();

        assert_eq!(revived.id, gadget.id);
        assert_eq!(revived.name, "Laser II");
        assert_eq!(revived.status, GadgetStatus::Available);
    }

    #[tokio::test]
    async fn test_update_rejects_illegal_transition_when_enforced() {
        let gadgets = service(true).await;
        let gadget = gadgets.create(Some("Laser".into())).await.unwrap();
        gadgets.self_destruct(gadget.id).await.unwrap();

        let err = gadgets
            .update(
                "Laser",
                GadgetUpdate {
                    new_name: None,
                    status: Some(GadgetStatus::Available),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GadgetError::IllegalTransition {
                from: GadgetStatus::Destroyed,
                to: GadgetStatus::Available
            }
        ));
    }

    #[tokio::test]
    async fn test_update_to_decommissioned_stamps_time() {
        let gadgets = service(false).await;
        gadgets.create(Some("Jetpack".into())).await.unwrap();

        let gadget = gadgets
            .update(
                "Jetpack",
                GadgetUpdate {
                    new_name: None,
                    status: Some(GadgetStatus::Decommissioned),
                },
            )
            .await
            .unwrap();

        assert_eq!(gadget.status, GadgetStatus::Decommissioned);
        assert!(gadget.decommissioned_at.is_some());
    }

    #[tokio::test]
    async fn test_decommission_keeps_timestamp_after_status_change() {
        let gadgets = service(false).await;
        gadgets.create(Some("Umbrella".into())).await.unwrap();
        gadgets.decommission("Umbrella").await.unwrap();

        let gadget = gadgets
            .update(
                "Umbrella",
                GadgetUpdate {
                    new_name: None,
                    status: Some(GadgetStatus::Available),
                },
            )
            .await
            .unwrap();

        assert_eq!(gadget.status, GadgetStatus::Available);
        assert!(gadget.decommissioned_at.is_some());
    }

    #[tokio::test]
    async fn test_missing_gadget() {
        let gadgets = service(false).await;

        assert!(matches!(
            gadgets.decommission("Ghost").await,
            Err(GadgetError::NotFound(_))
        ));
        assert!(matches!(
            gadgets.update("Ghost", GadgetUpdate::default()).await,
            Err(GadgetError::NotFound(_))
        ));
        assert!(matches!(
            gadgets.self_destruct(Uuid::new_v4()).await,
            Err(GadgetError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_self_destruct_twice() {
        let gadgets = service(false).await;
        let gadget = gadgets.create(Some("Shoe Phone".into())).await.unwrap();

        let destroyed = gadgets.self_destruct(gadget.id).await.unwrap();
        assert_eq!(destroyed.status, GadgetStatus::Destroyed);

        assert!(matches!(
            gadgets.self_destruct(gadget.id).await,
            Err(GadgetError::AlreadyDestroyed)
        ));
    }
}
