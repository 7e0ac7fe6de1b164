use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VisitorLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(VisitorLogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(VisitorLogs::EmployeeId).string().not_null())
                    .col(ColumnDef::new(VisitorLogs::EmployeeName).string().not_null())
                    .col(ColumnDef::new(VisitorLogs::EmployeeEmail).string().not_null())
                    .col(
                        ColumnDef::new(VisitorLogs::LoginTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(VisitorLogs::IpAddress).string().not_null())
                    .col(ColumnDef::new(VisitorLogs::UserAgent).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(VisitorLogs::Table, VisitorLogs::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VisitorLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VisitorLogs {
    Table,
    Id,
    EmployeeId,
    EmployeeName,
    EmployeeEmail,
    LoginTime,
    IpAddress,
    UserAgent,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
