use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Body shared by every `/usuarios` response: the payload (or a message)
/// plus the HTTP status repeated as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    pub status: u16,
}

impl<T> Envelope<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            data,
            status: status.as_u16(),
        }
    }

    /// 201 is what every successful operation reports.
    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, data)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
