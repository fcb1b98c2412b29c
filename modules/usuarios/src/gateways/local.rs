use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::UsuariosApi,
    error::UsuariosError,
    model::{User, UserData},
};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of the UsuariosApi trait that delegates to the domain service
pub struct UsuariosLocalClient {
    service: Arc<Service>,
}

impl UsuariosLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UsuariosApi for UsuariosLocalClient {
    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        self.service.list_users().await.map_err(to_anyhow)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Vec<User>> {
        self.service.find_by_email(email).await.map_err(to_anyhow)
    }

    async fn get_user(&self, id: &str) -> anyhow::Result<User> {
        self.service.get_user(id).await.map_err(to_anyhow)
    }

    async fn create_user(&self, data: UserData) -> anyhow::Result<User> {
        self.service.create_user(data).await.map_err(to_anyhow)
    }

    async fn update_user(&self, id: &str, data: UserData) -> anyhow::Result<User> {
        self.service.update_user(id, data).await.map_err(to_anyhow)
    }

    async fn delete_user(&self, id: &str) -> anyhow::Result<User> {
        self.service.delete_user(id).await.map_err(to_anyhow)
    }
}

impl From<DomainError> for UsuariosError {
    fn from(e: DomainError) -> Self {
        match e {
            // Malformed ids cannot name an existing user
            DomainError::UserNotFound { id } | DomainError::InvalidId { id } => {
                UsuariosError::not_found(id)
            }
            DomainError::EmailAlreadyExists { email } => UsuariosError::conflict(email),
            DomainError::Validation { fields } => {
                UsuariosError::validation(fields.into_iter().map(String::from).collect())
            }
            DomainError::Database { .. } | DomainError::RemovalFailed { .. } => {
                UsuariosError::internal()
            }
        }
    }
}

fn to_anyhow(e: DomainError) -> anyhow::Error {
    anyhow::Error::new(UsuariosError::from(e))
}
