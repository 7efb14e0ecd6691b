use std::sync::Arc;

use crate::config::Config;
use crate::db::{InMemoryUserRepository, Store, UserRepository};
use crate::services::{AuthService, DefaultAuthService, GadgetService, SeaOrmGadgetService};

/// Long-lived collaborators shared by every request.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub gadget_service: Arc<dyn GadgetService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let users = Arc::new(InMemoryUserRepository::new()) as Arc<dyn UserRepository>;
        Self::with_user_repository(config, users).await
    }

    /// Builds the state around a caller-supplied user repository.
    pub async fn with_user_repository(
        config: Config,
        users: Arc<dyn UserRepository>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let auth_service = Arc::new(DefaultAuthService::new(users, config.security.clone()))
            as Arc<dyn AuthService>;

        let gadget_service = Arc::new(SeaOrmGadgetService::new(
            store.clone(),
            config.gadgets.enforce_transitions,
        )) as Arc<dyn GadgetService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            auth_service,
            gadget_service,
        })
    }
}
