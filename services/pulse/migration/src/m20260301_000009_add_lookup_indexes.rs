use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(DailyLogs::Table)
                    .col(DailyLogs::EmployeeId)
                    .col((DailyLogs::Date, IndexOrder::Desc))
                    .col((DailyLogs::Timestamp, IndexOrder::Desc))
                    .name("idx_daily_logs_employee_id_date")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Tasks::Table)
                    .col(Tasks::EmployeeId)
                    .name("idx_tasks_employee_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(VisitorLogs::Table)
                    .col((VisitorLogs::LoginTime, IndexOrder::Desc))
                    .name("idx_visitor_logs_login_time")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_visitor_logs_login_time").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tasks_employee_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_daily_logs_employee_id_date")
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum DailyLogs {
    Table,
    EmployeeId,
    Date,
    Timestamp,
}

#[derive(Iden)]
enum Tasks {
    Table,
    EmployeeId,
}

#[derive(Iden)]
enum VisitorLogs {
    Table,
    LoginTime,
}
