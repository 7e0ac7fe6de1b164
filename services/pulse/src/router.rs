use axum::{
    Router,
    extract::Request,
    routing::{delete, get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use leadtrack_core::health::healthz;
use leadtrack_core::middleware::{
    REQUEST_ID_HEADER, propagate_request_id_layer, request_id_layer,
};

use crate::handlers::{
    analysis::analyze_employee,
    announcement::{broadcast, get_announcement},
    daily_log::{my_weekly_series, submit_daily_log},
    dashboard::dashboard,
    field::{add_field, list_fields, remove_field, stream_fields},
    health::readyz,
    performance::{latest_performance, leaderboard, stream_performance, weekly_performance},
    resource::{add_resource, delete_resource, list_resources, seed_resources},
    session::{get_session, sign_in, sign_out},
    settings::{get_webhook, set_webhook},
    task::{assign_task, my_tasks, toggle_task},
    user::{create_user, get_me, list_employees, update_me},
    visitor::list_visits,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Session
        .route("/session", get(get_session).post(sign_in).delete(sign_out))
        // Users
        .route("/users", post(create_user))
        .route("/users/@me", get(get_me).patch(update_me))
        .route("/users/@me/tasks", get(my_tasks))
        .route("/users/@me/logs/weekly", get(my_weekly_series))
        .route("/employees", get(list_employees))
        .route("/employees/{id}/analysis", post(analyze_employee))
        .route("/dashboard", get(dashboard))
        // Field schema
        .route("/fields", get(list_fields).post(add_field))
        .route("/fields/stream", get(stream_fields))
        .route("/fields/{id}", delete(remove_field))
        // Daily logs
        .route("/logs", post(submit_daily_log))
        // Performance
        .route("/performance", get(latest_performance))
        .route("/performance/weekly", get(weekly_performance))
        .route("/performance/leaderboard", get(leaderboard))
        .route("/performance/stream", get(stream_performance))
        // Tasks
        .route("/tasks", post(assign_task))
        .route("/tasks/{id}", patch(toggle_task))
        // Announcement
        .route("/announcement", get(get_announcement).put(broadcast))
        // Resources
        .route("/resources", get(list_resources).post(add_resource))
        .route("/resources/seed", post(seed_resources))
        .route("/resources/{id}", delete(delete_resource))
        // Visitor log
        .route("/visits", get(list_visits))
        // Settings
        .route("/settings/webhook", get(get_webhook).put(set_webhook))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id,
                    )
                }))
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
