use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_task_fields;
mod m20260301_000003_create_daily_logs;
mod m20260301_000004_create_tasks;
mod m20260301_000005_create_announcements;
mod m20260301_000006_create_resources;
mod m20260301_000007_create_visitor_logs;
mod m20260301_000008_create_app_config;
mod m20260301_000009_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_task_fields::Migration),
            Box::new(m20260301_000003_create_daily_logs::Migration),
            Box::new(m20260301_000004_create_tasks::Migration),
            Box::new(m20260301_000005_create_announcements::Migration),
            Box::new(m20260301_000006_create_resources::Migration),
            Box::new(m20260301_000007_create_visitor_logs::Migration),
            Box::new(m20260301_000008_create_app_config::Migration),
            Box::new(m20260301_000009_add_lookup_indexes::Migration),
        ]
    }
}
