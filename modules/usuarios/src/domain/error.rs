use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Malformed user id: '{id}'")]
    InvalidId { id: String },

    #[error("User with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("Missing required fields: {}", fields.join(", "))]
    Validation { fields: Vec<&'static str> },

    #[error("Database error: {message}")]
    Database { message: String },

    /// The user was found but the store failed to remove it.
    #[error("Failed to remove user {id}: {message}")]
    RemovalFailed { id: String, message: String },
}

impl DomainError {
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::UserNotFound { id: id.into() }
    }

    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId { id: id.into() }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
        }
    }

    pub fn validation(fields: Vec<&'static str>) -> Self {
        Self::Validation { fields }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn removal_failed(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemovalFailed {
            id: id.into(),
            message: message.into(),
        }
    }
}
