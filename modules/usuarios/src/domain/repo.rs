use async_trait::async_trait;
use thiserror::Error;

use crate::contract::model::{User, UserData};

/// Failures a repository adapter can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// The identifier is not a well-formed store id.
    #[error("invalid id '{0}'")]
    InvalidId(String),

    /// The unique email index rejected the write.
    #[error("duplicate email '{0}'")]
    DuplicateEmail(String),

    /// The store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence port for users. Every method is a single store call.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, RepoError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError>;

    /// Store a new user; the repository assigns the identifier.
    async fn insert(&self, data: UserData) -> Result<User, RepoError>;

    /// Full replacement. Returns the document as stored after the write,
    /// or `None` when no user has that id.
    async fn replace(&self, id: &str, data: UserData) -> Result<Option<User>, RepoError>;

    /// Returns the removed document, or `None` when no user has that id.
    async fn delete(&self, id: &str) -> Result<Option<User>, RepoError>;
}
