use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::contract::model::{User, UserData};
use crate::domain::error::DomainError;
use crate::domain::repo::{RepoError, UsersRepository};
use crate::domain::validation::missing_required_fields;

/// Domain service for the usuarios module.
///
/// Holds no state besides the repository; every operation issues the minimum
/// number of store calls for its semantics.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
}

impl From<RepoError> for DomainError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::InvalidId(id) => DomainError::invalid_id(id),
            RepoError::DuplicateEmail(email) => DomainError::email_already_exists(email),
            RepoError::Unavailable(msg) => DomainError::database(msg),
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "usuarios.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.repo.list().await?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    #[instrument(name = "usuarios.service.find_by_email", skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Vec<User>, DomainError> {
        Ok(self.repo.find_by_email(email).await?)
    }

    #[instrument(name = "usuarios.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: &str) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(name = "usuarios.service.create_user", skip(self, data), fields(email = %data.email))]
    pub async fn create_user(&self, data: UserData) -> Result<User, DomainError> {
        Self::validate(&data)?;

        // Fast path; the unique index still decides races.
        match self.repo.find_by_email(&data.email).await {
            Ok(existing) if !existing.is_empty() => {
                return Err(DomainError::email_already_exists(data.email));
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "email pre-check failed, relying on unique index"),
        }

        let user = self.repo.insert(data).await?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    #[instrument(name = "usuarios.service.update_user", skip(self, data), fields(user_id = %id))]
    pub async fn update_user(&self, id: &str, data: UserData) -> Result<User, DomainError> {
        Self::validate(&data)?;

        let user = self
            .repo
            .replace(id, data)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        info!("user updated");
        Ok(user)
    }

    #[instrument(name = "usuarios.service.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &str) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        let user = match self.repo.delete(id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(DomainError::user_not_found(id)),
            Err(RepoError::Unavailable(msg)) => return Err(DomainError::removal_failed(id, msg)),
            Err(e) => return Err(e.into()),
        };
        info!("user deleted");
        Ok(user)
    }

    fn validate(data: &UserData) -> Result<(), DomainError> {
        let missing = missing_required_fields(data);
        if missing.is_empty() {
            Ok(())
        } else {
            debug!(fields = ?missing, "rejecting incomplete user payload");
            Err(DomainError::validation(missing))
        }
    }
}
