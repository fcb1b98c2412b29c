use async_trait::async_trait;

use crate::contract::model::{User, UserData};
use crate::domain::repo::{RepoError, UsersRepository};

/// Stand-in used when the store could not be reached at startup.
///
/// The HTTP surface stays up and every operation reports the store as
/// unavailable, which handlers turn into their failure responses.
pub struct UnavailableUsersRepository {
    reason: String,
}

impl UnavailableUsersRepository {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn err<T>(&self) -> Result<T, RepoError> {
        Err(RepoError::Unavailable(self.reason.clone()))
    }
}

#[async_trait]
impl UsersRepository for UnavailableUsersRepository {
    async fn list(&self) -> Result<Vec<User>, RepoError> {
        self.err()
    }

    async fn find_by_email(&self, _email: &str) -> Result<Vec<User>, RepoError> {
        self.err()
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<User>, RepoError> {
        self.err()
    }

    async fn insert(&self, _data: UserData) -> Result<User, RepoError> {
        self.err()
    }

    async fn replace(&self, _id: &str, _data: UserData) -> Result<Option<User>, RepoError> {
        self.err()
    }

    async fn delete(&self, _id: &str) -> Result<Option<User>, RepoError> {
        self.err()
    }
}
