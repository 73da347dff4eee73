use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::create_cors_layer;
use crate::handlers::{create_event, get_data, health_check, list_events};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/events", get(list_events).post(create_event))
        .route("/data", get(get_data))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
}
