use sea_orm_migration::prelude::*;

/// Adds `folder_id` and `order_index` to `notes`.
///
/// `SQLite` accepts one column per `ALTER TABLE`, hence two statements.
/// Existing rows land in the root folder with key 0.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_column("notes", "folder_id").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Note::Table)
                        .add_column(ColumnDef::new(Note::FolderId).string().null())
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_column("notes", "order_index").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Note::Table)
                        .add_column(
                            ColumnDef::new(Note::OrderIndex)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Note::Table)
                    .drop_column(Note::OrderIndex)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Note::Table)
                    .drop_column(Note::FolderId)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Note {
    #[sea_orm(iden = "notes")]
    Table,
    FolderId,
    OrderIndex,
}
