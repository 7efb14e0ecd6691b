use crate::domain::GadgetStatus;
use crate::models::gadget::Gadget;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

pub mod migrator;
pub mod repositories;

pub use repositories::user::{InMemoryUserRepository, User, UserRepository, UserStoreError};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // Every pooled connection to an in-memory SQLite database sees its
        // own empty database, so those get exactly one connection.
        let in_memory = db_url.contains(":memory:");
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn gadget_repo(&self) -> repositories::gadget::GadgetRepository {
        repositories::gadget::GadgetRepository::new(self.conn.clone())
    }

    pub async fn insert_gadget(&self, gadget: &Gadget) -> Result<Gadget> {
        self.gadget_repo().insert(gadget).await
    }

    pub async fn save_gadget(&self, gadget: &Gadget) -> Result<Gadget> {
        self.gadget_repo().save(gadget).await
    }

    pub async fn list_gadgets(&self, status: Option<GadgetStatus>) -> Result<Vec<Gadget>> {
        self.gadget_repo().list(status).await
    }

    pub async fn find_gadget_by_name(&self, name: &str) -> Result<Option<Gadget>> {
        self.gadget_repo().find_by_name(name).await
    }

    pub async fn find_gadget_by_id(&self, id: Uuid) -> Result<Option<Gadget>> {
        self.gadget_repo().find_by_id(id).await
    }
}
