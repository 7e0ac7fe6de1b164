use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(leadtrack_pulse_migration::Migrator).await;
}
