use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TaskFields::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TaskFields::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TaskFields::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(TaskFields::Label).string().not_null())
                    .col(ColumnDef::new(TaskFields::Placeholder).string().not_null())
                    .col(
                        ColumnDef::new(TaskFields::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TaskFields::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TaskFields {
    Table,
    Id,
    Name,
    Label,
    Placeholder,
    CreatedAt,
}
