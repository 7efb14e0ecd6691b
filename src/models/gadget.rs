use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::GadgetStatus;
use crate::entities::gadgets;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gadget {
    pub id: Uuid,
    pub name: String,
    pub status: GadgetStatus,
    pub decommissioned_at: Option<DateTime<Utc>>,
}

impl Gadget {
    /// A freshly issued gadget: new id, `Available`, never decommissioned.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: GadgetStatus::Available,
            decommissioned_at: None,
        }
    }

    /// Retires the gadget, stamping the retirement time.
    pub fn decommission(&mut self, at: DateTime<Utc>) {
        self.status = GadgetStatus::Decommissioned;
        self.decommissioned_at = Some(at);
    }
}

impl From<gadgets::Model> for Gadget {
    fn from(model: gadgets::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            status: model.status,
            decommissioned_at: model.decommissioned_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_gadget_is_available() {
        let gadget = Gadget::new("The Kraken");
        assert_eq!(gadget.name, "The Kraken");
        assert_eq!(gadget.status, GadgetStatus::Available);
        assert!(gadget.decommissioned_at.is_none());
    }

    #[test]
    fn test_decommission_sets_timestamp() {
        let mut gadget = Gadget::new("The Shadow");
        let at = Utc::now();
        gadget.decommission(at);
        assert_eq!(gadget.status, GadgetStatus::Decommissioned);
        assert_eq!(gadget.decommissioned_at, Some(at));
    }
}
