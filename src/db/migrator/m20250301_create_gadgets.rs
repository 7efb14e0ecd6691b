use crate::entities::gadgets;
use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Gadgets)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Update and decommission look gadgets up by name.
        manager
            .create_index(
                Index::create()
                    .name("idx_gadgets_name")
                    .table(Gadgets)
                    .col(gadgets::Column::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gadgets_status")
                    .table(Gadgets)
                    .col(gadgets::Column::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gadgets).to_owned())
            .await?;

        Ok(())
    }
}
