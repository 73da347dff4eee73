use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::models::CreateEventRequest;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success, wrapped_data};

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
}

/// Liveness only; never touches the database.
pub async fn health_check() -> Response {
    success(HealthPayload { status: "healthy" }).into_response()
}

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state
        .store
        .list()
        .await
        .map_err(|e| AppError::listing("During events retrieval", e))?;

    Ok(success(events).into_response())
}

pub async fn create_event(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let event = CreateEventRequest::from_body(&body)
        .validate()
        .map_err(AppError::ValidationError)?;

    let title = event.title.clone();
    state
        .store
        .create(event)
        .await
        .map_err(|e| AppError::internal("During event creation", e))?;

    tracing::info!(title = %title, "Event created");
    Ok(created("Event created successfully").into_response())
}

pub async fn get_data(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state
        .store
        .list()
        .await
        .map_err(|e| AppError::internal("During data retrieval", e))?;

    Ok(wrapped_data(events).into_response())
}
