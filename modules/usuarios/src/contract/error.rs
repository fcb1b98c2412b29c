use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsuariosError {
    #[error("User not found: {id}")]
    NotFound { id: String },

    #[error("User with email '{email}' already exists")]
    Conflict { email: String },

    #[error("Missing required fields: {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    #[error("Internal error")]
    Internal,
}

impl UsuariosError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn conflict(email: impl Into<String>) -> Self {
        Self::Conflict {
            email: email.into(),
        }
    }

    pub fn validation(fields: Vec<String>) -> Self {
        Self::Validation { fields }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}
