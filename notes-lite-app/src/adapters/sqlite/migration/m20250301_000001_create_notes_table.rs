use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Note::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Note::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Note::UserId).string().not_null())
                    .col(ColumnDef::new(Note::Title).string().not_null().default(""))
                    .col(ColumnDef::new(Note::Content).text().not_null().default(""))
                    .col(ColumnDef::new(Note::Tags).string().not_null().default("[]"))
                    .col(ColumnDef::new(Note::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Note::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Note::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Note {
    #[sea_orm(iden = "notes")]
    Table,
    Id,
    UserId,
    Title,
    Content,
    Tags,
    CreatedAt,
    UpdatedAt,
}
