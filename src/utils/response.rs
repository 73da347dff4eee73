use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Serialize)]
pub struct DataBody<T>
where
    T: Serialize,
{
    pub data: T,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

pub fn success<T>(payload: T) -> impl IntoResponse
where
    T: Serialize,
{
    (StatusCode::OK, Json(payload))
}

pub fn wrapped_data<T>(data: T) -> impl IntoResponse
where
    T: Serialize,
{
    (StatusCode::OK, Json(DataBody { data }))
}

pub fn created(message: impl Into<String>) -> impl IntoResponse {
    let body = MessageBody {
        message: message.into(),
    };
    (StatusCode::CREATED, Json(body))
}

pub fn error(message: impl Into<String>, detail: Option<String>, status: StatusCode) -> Response {
    let body = ApiErrorBody {
        error: message.into(),
        detail,
    };

    (status, Json(body)).into_response()
}
