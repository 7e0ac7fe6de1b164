use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No unique (employee_id, date): append mode stores several logs per day.
        manager
            .create_table(
                Table::create()
                    .table(DailyLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DailyLogs::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(DailyLogs::EmployeeId).string().not_null())
                    .col(ColumnDef::new(DailyLogs::Date).date().not_null())
                    .col(
                        ColumnDef::new(DailyLogs::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(DailyLogs::Notes).text().null())
                    .col(
                        ColumnDef::new(DailyLogs::Metrics)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DailyLogs::Table, DailyLogs::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DailyLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DailyLogs {
    Table,
    Id,
    EmployeeId,
    Date,
    Timestamp,
    Notes,
    Metrics,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
