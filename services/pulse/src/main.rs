use std::sync::Arc;

use anyhow::Context;
use sea_orm::Database;
use tracing::info;

use leadtrack_core::tracing::init_tracing;
use leadtrack_pulse::config::PulseConfig;
use leadtrack_pulse::infra::feed::ChangeFeed;
use leadtrack_pulse::infra::http::build_client;
use leadtrack_pulse::infra::identity::HttpIdentityGateway;
use leadtrack_pulse::router::build_router;
use leadtrack_pulse::state::AppState;
use leadtrack_pulse::usecase::optimistic::TaskStatusView;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("leadtrack_pulse=info,tower_http=info");

    let config = PulseConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let http = build_client(config.http_timeout)?;
    let identity = HttpIdentityGateway::new(http.clone(), &config.identity_url);

    let state = AppState {
        db,
        feed: ChangeFeed::default(),
        http,
        identity,
        settings: Arc::new(config.settings),
        task_view: TaskStatusView::default(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.pulse_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("pulse service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
