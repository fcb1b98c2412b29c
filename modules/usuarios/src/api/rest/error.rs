use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, warn};

use crate::api::rest::{messages, response::Envelope};
use crate::domain::error::DomainError;

/// Which endpoint failed; each one owns its own status/message table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// A failed `/usuarios` request rendered as an envelope with a fixed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub const fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    pub const fn fields_required() -> Self {
        Self::new(StatusCode::BAD_REQUEST, messages::FIELDS_REQUIRED)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Envelope::new(self.status, self.message).into_response()
    }
}

/// Map a domain error to the response of the endpoint that produced it.
pub fn map_domain_error(op: Operation, err: &DomainError) -> ApiError {
    use DomainError::*;
    use Operation::*;

    match err {
        Database { message } | RemovalFailed { message, .. } => {
            error!(operation = ?op, %message, "store failure")
        }
        Validation { fields } => info!(operation = ?op, ?fields, "missing required fields"),
        other => info!(operation = ?op, error = %other, "request rejected"),
    }

    let (status, message) = match (op, err) {
        (List, _) => (StatusCode::INTERNAL_SERVER_ERROR, messages::LIST_FAILED),

        // A lookup has a single failure outcome, whatever the cause
        (Get, _) => (StatusCode::NOT_FOUND, messages::USER_NOT_FOUND_OR_REMOVED),

        (Create | Update, Validation { .. }) => {
            (StatusCode::BAD_REQUEST, messages::FIELDS_REQUIRED)
        }
        (Create | Update, EmailAlreadyExists { .. }) => {
            (StatusCode::PRECONDITION_FAILED, messages::EMAIL_DUPLICATED)
        }
        (Create, _) => (StatusCode::INTERNAL_SERVER_ERROR, messages::SERVER_PROBLEM),

        (Update, UserNotFound { .. } | InvalidId { .. }) => {
            (StatusCode::NOT_FOUND, messages::USER_DOES_NOT_EXIST)
        }
        (Update, _) => (StatusCode::INTERNAL_SERVER_ERROR, messages::UPDATE_FAILED),

        // Only the removal itself can fail with 502; a failed lookup is a miss.
        (Delete, RemovalFailed { .. }) => (StatusCode::BAD_GATEWAY, messages::UNEXPECTED_ERROR),
        (Delete, _) => (StatusCode::NOT_FOUND, messages::USER_DOES_NOT_EXIST),
    };

    ApiError::new(status, message)
}

/// An unreadable JSON body counts as missing fields.
pub fn map_json_rejection(op: Operation, rejection: &JsonRejection) -> ApiError {
    warn!(operation = ?op, error = %rejection.body_text(), "unreadable request body");
    ApiError::fields_required()
}
